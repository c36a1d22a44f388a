//! Stochastic hill climbing and its special cases.
//!
//! Each step samples one random action. Moves that do not worsen the
//! heuristic are taken; worsening moves are taken with the probability given
//! by the [`Acceptance`] rule:
//! - [`FirstChoice`]: never (first-choice hill climbing)
//! - [`Annealing`]: `1 / (1 + exp(delta / T))` with geometric cooling
//!   (simulated annealing)
//! - [`Constant`]: a fixed probability

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::core::{HeuristicProblem, SearchResult, SearchRng, SearchStats};

use super::acceptance::{Acceptance, Annealing, FirstChoice};
use super::config::{AnnealingConfig, LocalConfig};
use super::LocalSearch;

/// Random-walk hill climbing with a pluggable acceptance rule.
pub struct StochasticHillClimbing<'p, P: HeuristicProblem, A> {
    problem: &'p P,
    config: LocalConfig,
    acceptance: A,
    rng: SearchRng,
    state: P::State,
    cost: f64,
    stats: SearchStats,
}

/// Rejects every worsening move.
pub type FirstChoiceHillClimbing<'p, P> = StochasticHillClimbing<'p, P, FirstChoice>;

/// Accepts worsening moves less often as the temperature falls.
pub type SimulatedAnnealing<'p, P> = StochasticHillClimbing<'p, P, Annealing>;

impl<'p, P: HeuristicProblem, A: Acceptance> StochasticHillClimbing<'p, P, A> {
    /// Create the search at the problem's initial state.
    pub fn new(problem: &'p P, config: LocalConfig, acceptance: A) -> SearchResult<Self> {
        config
            .validate()
            .inspect_err(|e| warn!(%e, "rejected stochastic hill climbing config"))?;
        Ok(Self {
            problem,
            rng: SearchRng::new(config.seed),
            config,
            acceptance,
            state: problem.initial_state(),
            cost: 0.0,
            stats: SearchStats::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &LocalConfig {
        &self.config
    }

    #[must_use]
    pub fn acceptance(&self) -> &A {
        &self.acceptance
    }
}

impl<'p, P: HeuristicProblem> StochasticHillClimbing<'p, P, FirstChoice> {
    /// First-choice hill climbing.
    pub fn first_choice(problem: &'p P, config: LocalConfig) -> SearchResult<Self> {
        Self::new(problem, config, FirstChoice)
    }
}

impl<'p, P: HeuristicProblem> StochasticHillClimbing<'p, P, Annealing> {
    /// Simulated annealing with the given cooling schedule.
    pub fn annealing(
        problem: &'p P,
        config: LocalConfig,
        schedule: AnnealingConfig,
    ) -> SearchResult<Self> {
        let acceptance =
            Annealing::new(schedule).inspect_err(|e| warn!(%e, "rejected annealing schedule"))?;
        Self::new(problem, config, acceptance)
    }

    /// Current temperature.
    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.acceptance.temperature()
    }
}

impl<P: HeuristicProblem, A: Acceptance> LocalSearch for StochasticHillClimbing<'_, P, A> {
    type Problem = P;

    fn search(&mut self) -> bool {
        let start = Instant::now();
        self.stats.reset();
        let problem = self.problem;

        for _ in 0..self.config.max_iter {
            if problem.is_goal(&self.state) {
                break;
            }
            let actions = problem.actions(&self.state);
            let Some(action) = self.rng.choose(&actions).cloned() else {
                break;
            };
            self.stats.iterations += 1;
            self.stats.nodes_generated += 1;

            let next = problem.result(&self.state, &action);
            let delta = problem.heuristic(&next) - problem.heuristic(&self.state);
            let accept = delta <= 0.0 || self.rng.gen_bool(self.acceptance.probability(delta));
            self.acceptance.step();

            if accept {
                trace!(?action, delta, "accepted");
                self.stats.accepted += 1;
                self.cost += problem.action_cost(&self.state, &action);
                self.state = next;
            } else {
                trace!(?action, delta, "rejected");
                self.stats.rejected += 1;
            }
        }

        let solved = problem.is_goal(&self.state);
        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            solved,
            iterations = self.stats.iterations,
            accepted = self.stats.accepted,
            rejected = self.stats.rejected,
            cost = self.cost,
            "stochastic hill climbing finished"
        );
        solved
    }

    fn state(&self) -> &P::State {
        &self.state
    }

    fn cost(&self) -> f64 {
        self.cost
    }

    fn reset(&mut self, state: P::State) {
        self.state = state;
        self.cost = 0.0;
        self.acceptance.reset();
    }

    fn problem(&self) -> &P {
        self.problem
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
