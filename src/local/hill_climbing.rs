//! Steepest-descent hill climbing.

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::core::{HeuristicProblem, SearchResult, SearchStats};

use super::config::LocalConfig;
use super::LocalSearch;

/// Moves to the best neighbor while it is strictly better than the current
/// state.
///
/// Stops at a goal, at a state without actions, when no neighbor improves
/// (local optimum or plateau), or when the budget is spent.
pub struct HillClimbing<'p, P: HeuristicProblem> {
    problem: &'p P,
    config: LocalConfig,
    state: P::State,
    cost: f64,
    stats: SearchStats,
}

impl<'p, P: HeuristicProblem> HillClimbing<'p, P> {
    /// Create the search at the problem's initial state.
    pub fn new(problem: &'p P, config: LocalConfig) -> SearchResult<Self> {
        config
            .validate()
            .inspect_err(|e| warn!(%e, "rejected hill climbing config"))?;
        Ok(Self {
            problem,
            config,
            state: problem.initial_state(),
            cost: 0.0,
            stats: SearchStats::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &LocalConfig {
        &self.config
    }

    /// The neighbor with the lowest heuristic, first-found on ties.
    fn best_neighbor(&mut self) -> Option<(P::Action, P::State, f64)> {
        let problem = self.problem;
        let mut best: Option<(P::Action, P::State, f64)> = None;

        for action in problem.actions(&self.state) {
            let next = problem.result(&self.state, &action);
            let h = problem.heuristic(&next);
            self.stats.nodes_generated += 1;
            if best.as_ref().map_or(true, |(_, _, best_h)| h < *best_h) {
                best = Some((action, next, h));
            }
        }
        best
    }
}

impl<P: HeuristicProblem> LocalSearch for HillClimbing<'_, P> {
    type Problem = P;

    fn search(&mut self) -> bool {
        let start = Instant::now();
        self.stats.reset();
        let problem = self.problem;

        for _ in 0..self.config.max_iter {
            if problem.is_goal(&self.state) {
                break;
            }
            self.stats.iterations += 1;

            let Some((action, next, h)) = self.best_neighbor() else {
                break;
            };
            let current = problem.heuristic(&self.state);
            if h >= current {
                trace!(current, best = h, "no improving neighbor");
                break;
            }

            self.stats.nodes_expanded += 1;
            self.stats.accepted += 1;
            self.cost += problem.action_cost(&self.state, &action);
            trace!(?action, from = current, to = h, "climbed");
            self.state = next;
        }

        let solved = problem.is_goal(&self.state);
        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            solved,
            steps = self.stats.accepted,
            cost = self.cost,
            heuristic = problem.heuristic(&self.state),
            "hill climbing finished"
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
    }

    fn problem(&self) -> &P {
        self.problem
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
