//! Acceptance rules for worsening moves in stochastic hill climbing.

use serde::{Deserialize, Serialize};

use crate::core::{SearchError, SearchResult};

use super::config::AnnealingConfig;

/// Probability of taking a move that worsens the heuristic.
///
/// Only consulted for moves with `delta > 0`; moves that do not worsen the
/// heuristic are always taken.
pub trait Acceptance {
    /// Probability in [0, 1] of accepting a move that worsens the heuristic
    /// by `delta`.
    fn probability(&self, delta: f64) -> f64;

    /// Advance internal schedules by one step.
    fn step(&mut self) {}

    /// Restore the initial schedule.
    fn reset(&mut self) {}
}

/// Never accept a worsening move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FirstChoice;

impl Acceptance for FirstChoice {
    fn probability(&self, _delta: f64) -> f64 {
        0.0
    }
}

/// Accept every worsening move with the same probability.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    p: f64,
}

impl Constant {
    pub fn new(p: f64) -> SearchResult<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(SearchError::invalid(
                "probability",
                format!("must be in [0, 1], got {p}"),
            ));
        }
        Ok(Self { p })
    }
}

impl Default for Constant {
    fn default() -> Self {
        Self { p: 0.5 }
    }
}

impl Acceptance for Constant {
    fn probability(&self, _delta: f64) -> f64 {
        self.p
    }
}

/// Simulated annealing: `1 / (1 + exp(delta / T))`, with `T` multiplied by
/// `alpha` after every step.
///
/// `delta` is how much the move worsens the heuristic, i.e. the negated
/// slope `h(current) - h(next)`, so worse moves are always taken with
/// probability below one half.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annealing {
    schedule: AnnealingConfig,
    temperature: f64,
}

impl Annealing {
    pub fn new(schedule: AnnealingConfig) -> SearchResult<Self> {
        schedule.validate()?;
        Ok(Self {
            temperature: schedule.initial_temperature,
            schedule,
        })
    }

    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// True once the temperature is below the configured floor.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.temperature < self.schedule.min_temperature || self.temperature == 0.0
    }

    #[must_use]
    pub fn schedule(&self) -> &AnnealingConfig {
        &self.schedule
    }
}

impl Acceptance for Annealing {
    fn probability(&self, delta: f64) -> f64 {
        if self.is_frozen() {
            return 0.0;
        }
        // exp overflows to infinity for large ratios, giving 0
        1.0 / (1.0 + (delta / self.temperature).exp())
    }

    fn step(&mut self) {
        self.temperature *= self.schedule.alpha;
    }

    fn reset(&mut self) {
        self.temperature = self.schedule.initial_temperature;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_choice_rejects() {
        assert_eq!(FirstChoice.probability(0.1), 0.0);
        assert_eq!(FirstChoice.probability(100.0), 0.0);
    }

    #[test]
    fn test_constant() {
        assert_eq!(Constant::default().probability(3.0), 0.5);
        assert_eq!(Constant::new(0.2).unwrap().probability(1.0), 0.2);
        assert!(Constant::new(1.2).is_err());
        assert!(Constant::new(f64::NAN).is_err());
    }

    #[test]
    fn test_annealing_probability() {
        let a = Annealing::new(AnnealingConfig::default()).unwrap();
        // T = 1: 1 / (1 + e)
        let expected = 1.0 / (1.0 + std::f64::consts::E);
        assert!((a.probability(1.0) - expected).abs() < 1e-12);
        // Larger deltas are less likely
        assert!(a.probability(2.0) < a.probability(1.0));
        assert_eq!(a.probability(1e6), 0.0);
    }

    #[test]
    fn test_annealing_worse_moves_below_half() {
        let config = AnnealingConfig::default().with_initial_temperature(50.0);
        let a = Annealing::new(config).unwrap();

        for delta in [1e-9, 0.5, 1.0, 10.0, 100.0] {
            let p = a.probability(delta);
            assert!(p < 0.5, "delta {delta} accepted with {p}");
            assert!(p >= 0.0);
        }
        // Tiny worsening at high temperature is close to a coin flip
        assert!(a.probability(1e-9) > 0.49);
    }

    #[test]
    fn test_cooling_compounds() {
        let config = AnnealingConfig::default()
            .with_initial_temperature(8.0)
            .with_alpha(0.5);
        let mut a = Annealing::new(config).unwrap();

        a.step();
        a.step();
        a.step();
        assert_eq!(a.temperature(), 1.0);

        a.reset();
        assert_eq!(a.temperature(), 8.0);
    }

    #[test]
    fn test_frozen() {
        let config = AnnealingConfig::default()
            .with_initial_temperature(1.0)
            .with_alpha(0.1)
            .with_min_temperature(0.05);
        let mut a = Annealing::new(config).unwrap();

        a.step();
        assert!(!a.is_frozen());
        a.step();
        assert!(a.is_frozen());
        assert_eq!(a.probability(0.001), 0.0);
    }

    #[test]
    fn test_invalid_schedule() {
        let config = AnnealingConfig::default().with_alpha(2.0);
        assert!(Annealing::new(config).is_err());
    }
}
