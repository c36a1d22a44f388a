//! Local search configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::{SearchError, SearchResult};

/// Budget and seed shared by every local search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Maximum main-loop iterations per `search` call.
    pub max_iter: usize,

    /// Random seed. Same seed produces the same run.
    /// Deterministic algorithms ignore it.
    pub seed: u64,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            seed: 42,
        }
    }
}

impl LocalConfig {
    /// Create a new config with custom iteration budget.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> SearchResult<()> {
        if self.max_iter == 0 {
            return Err(SearchError::invalid("max_iter", "must be at least 1"));
        }
        Ok(())
    }
}

/// Cooling schedule for simulated annealing.
///
/// Temperature starts at `initial_temperature` and is multiplied by `alpha`
/// after every step. Once it falls below `min_temperature` no worsening
/// move is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnealingConfig {
    pub initial_temperature: f64,

    /// Geometric cooling factor, in (0, 1].
    pub alpha: f64,

    pub min_temperature: f64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1.0,
            alpha: 0.99,
            min_temperature: 1e-6,
        }
    }
}

impl AnnealingConfig {
    /// Create a new config with custom starting temperature.
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Create a new config with custom cooling factor.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn validate(&self) -> SearchResult<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(SearchError::invalid(
                "initial_temperature",
                format!("must be finite and positive, got {}", self.initial_temperature),
            ));
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(SearchError::invalid(
                "alpha",
                format!("must be in (0, 1], got {}", self.alpha),
            ));
        }
        if !self.min_temperature.is_finite() || self.min_temperature < 0.0 {
            return Err(SearchError::invalid(
                "min_temperature",
                format!("must be finite and non-negative, got {}", self.min_temperature),
            ));
        }
        Ok(())
    }
}

/// Local beam search parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeamConfig {
    /// Number of states kept per iteration.
    pub beam_width: usize,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self { beam_width: 4 }
    }
}

impl BeamConfig {
    pub fn with_beam_width(mut self, k: usize) -> Self {
        self.beam_width = k;
        self
    }

    pub fn validate(&self) -> SearchResult<()> {
        if self.beam_width == 0 {
            return Err(SearchError::invalid("beam_width", "must be at least 1"));
        }
        Ok(())
    }
}

/// Genetic algorithm parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Population size, at least 2.
    pub pop_size: usize,

    /// Probability that a child is mutated, in [0, 1].
    pub mutation_rate: f64,

    /// Best members copied unchanged into the next generation.
    pub elitism: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            pop_size: 50,
            mutation_rate: 0.1,
            elitism: 0,
        }
    }
}

impl GeneticConfig {
    /// Create a new config with custom population size.
    pub fn with_pop_size(mut self, n: usize) -> Self {
        self.pop_size = n;
        self
    }

    /// Create a new config with custom mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_elitism(mut self, n: usize) -> Self {
        self.elitism = n;
        self
    }

    pub fn validate(&self) -> SearchResult<()> {
        if self.pop_size < 2 {
            return Err(SearchError::invalid(
                "pop_size",
                format!("must be at least 2, got {}", self.pop_size),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SearchError::invalid(
                "mutation_rate",
                format!("must be in [0, 1], got {}", self.mutation_rate),
            ));
        }
        if self.elitism >= self.pop_size {
            return Err(SearchError::invalid(
                "elitism",
                format!("must be below pop_size ({}), got {}", self.pop_size, self.elitism),
            ));
        }
        Ok(())
    }
}

/// Random restart parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RestartConfig {
    /// Number of runs of the wrapped algorithm, at least 1.
    pub restarts: usize,

    /// Seed for drawing restart states.
    pub seed: u64,

    /// Stop at the first successful run instead of looking for a cheaper one.
    pub stop_on_success: bool,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            restarts: 10,
            seed: 42,
            stop_on_success: false,
        }
    }
}

impl RestartConfig {
    /// Create a new config with custom restart count.
    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_stop_on_success(mut self, stop: bool) -> Self {
        self.stop_on_success = stop;
        self
    }

    pub fn validate(&self) -> SearchResult<()> {
        if self.restarts == 0 {
            return Err(SearchError::invalid("restarts", "must be at least 1"));
        }
        Ok(())
    }
}
