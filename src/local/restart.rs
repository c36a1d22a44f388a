//! Random restarts around any local search.

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::core::{
    HeuristicProblem, SearchError, SearchProblem, SearchResult, SearchRng, SearchStats,
};

use super::config::RestartConfig;
use super::LocalSearch;

type StateOf<L> = <<L as LocalSearch>::Problem as SearchProblem>::State;

/// Reruns a wrapped local search from freshly sampled states.
///
/// Every run starts from `sample_state`, drawn from its own fork of the
/// restart RNG. The lowest-cost successful run is kept; with
/// `stop_on_success` the first success ends the search instead.
pub struct RandomRestart<'p, L: LocalSearch> {
    problem: &'p L::Problem,
    inner: L,
    config: RestartConfig,
    rng: SearchRng,
    state: StateOf<L>,
    cost: f64,
    stats: SearchStats,
}

impl<'p, L: LocalSearch> RandomRestart<'p, L> {
    /// Wrap `inner`. Fails unless `inner` is bound to this very `problem`
    /// instance and the restart count is positive.
    pub fn new(problem: &'p L::Problem, inner: L, config: RestartConfig) -> SearchResult<Self> {
        if !std::ptr::eq(problem, inner.problem()) {
            let err = SearchError::ProblemMismatch;
            warn!(%err, "rejected random restart");
            return Err(err);
        }
        config
            .validate()
            .inspect_err(|e| warn!(%e, "rejected random restart config"))?;

        Ok(Self {
            problem,
            rng: SearchRng::new(config.seed),
            config,
            state: problem.initial_state(),
            cost: 0.0,
            inner,
            stats: SearchStats::default(),
        })
    }

    #[must_use]
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Unwrap the inner algorithm.
    pub fn into_inner(self) -> L {
        self.inner
    }

    #[must_use]
    pub fn config(&self) -> &RestartConfig {
        &self.config
    }
}

impl<L: LocalSearch> LocalSearch for RandomRestart<'_, L> {
    type Problem = L::Problem;

    fn search(&mut self) -> bool {
        let start = Instant::now();
        self.stats.reset();
        let problem = self.problem;

        let mut best: Option<(StateOf<L>, f64)> = None;
        let mut closest: Option<(StateOf<L>, f64)> = None;
        let mut successes = 0u64;

        for run in 0..self.config.restarts {
            let mut run_rng = self.rng.fork();
            let start_state = problem.sample_state(&mut run_rng);
            self.inner.reset(start_state);

            let solved = self.inner.search();
            self.stats.absorb(self.inner.stats());
            let cost = self.inner.cost();
            trace!(run, solved, cost, "restart finished");

            if solved {
                successes += 1;
                if best.as_ref().map_or(true, |(_, c)| cost < *c) {
                    best = Some((self.inner.state().clone(), cost));
                }
                if self.config.stop_on_success {
                    break;
                }
            } else {
                let h = problem.heuristic(self.inner.state());
                if closest.as_ref().map_or(true, |(s, _)| h < problem.heuristic(s)) {
                    closest = Some((self.inner.state().clone(), cost));
                }
            }
        }

        if let Some((state, cost)) = best.or(closest) {
            self.state = state;
            self.cost = cost;
        }

        let solved = problem.is_goal(&self.state);
        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            solved,
            restarts = self.config.restarts,
            successes,
            cost = self.cost,
            "random restart finished"
        );
        solved
    }

    /// The best state found: the cheapest success, else the run that ended
    /// closest to a goal.
    fn state(&self) -> &StateOf<L> {
        &self.state
    }

    fn cost(&self) -> f64 {
        self.cost
    }

    fn reset(&mut self, state: StateOf<L>) {
        self.state = state;
        self.cost = 0.0;
    }

    fn problem(&self) -> &L::Problem {
        self.problem
    }

    /// Counters summed over all runs.
    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
