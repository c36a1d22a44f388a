//! Iterative deepening: depth-limited DFS with bounds 1, 2, 3, ...

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::core::{Path, SearchProblem, SearchResult, SearchStats};

use super::best_first::{BestFirstSearch, PathSearch};
use super::config::DepthConfig;

/// Repeated depth-limited DFS up to a depth ceiling.
///
/// Each round is a fresh search; nothing is shared between rounds. The
/// returned path is the first one found, so it is the shortest in number of
/// actions only up to DFS's depth-limited duplicate handling.
pub struct IterativeDeepening<'p, P: SearchProblem> {
    problem: &'p P,
    config: DepthConfig,
    stats: SearchStats,
}

impl<'p, P: SearchProblem> IterativeDeepening<'p, P> {
    /// Create the search. Fails if the depth ceiling is zero.
    pub fn new(problem: &'p P, config: DepthConfig) -> SearchResult<Self> {
        config
            .validate()
            .inspect_err(|e| warn!(%e, "rejected iterative deepening config"))?;
        Ok(Self {
            problem,
            config,
            stats: SearchStats::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &DepthConfig {
        &self.config
    }

    /// Run rounds with increasing depth bound until one finds a goal.
    pub fn search(&mut self) -> Path<P::Action> {
        let start = Instant::now();
        self.stats.reset();

        for depth in 1..=self.config.max_depth {
            let mut round = BestFirstSearch::depth_first(self.problem, Some(depth));
            let path = round.search();
            self.stats.absorb(round.stats());
            self.stats.iterations += 1;
            trace!(depth, found = path.is_found(), "deepening round finished");

            if path.is_found() {
                self.stats.time_us = start.elapsed().as_micros() as u64;
                debug!(depth, length = path.len(), expanded = self.stats.nodes_expanded, "iterative deepening found a path");
                return path;
            }
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            max_depth = self.config.max_depth,
            expanded = self.stats.nodes_expanded,
            "iterative deepening exhausted"
        );
        Path::not_found()
    }

    /// Counters summed over all rounds; `iterations` is the number of rounds.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

impl<P: SearchProblem> PathSearch<P::Action> for IterativeDeepening<'_, P> {
    fn search(&mut self) -> Path<P::Action> {
        IterativeDeepening::search(self)
    }

    fn stats(&self) -> &SearchStats {
        IterativeDeepening::stats(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Binary tree over integers: n -> 2n, 2n+1. Infinite, so plain DFS
    /// without a bound never returns.
    struct Tree {
        goal: u64,
    }

    impl SearchProblem for Tree {
        type State = u64;
        type Action = u64;

        fn initial_state(&self) -> u64 {
            1
        }

        fn actions(&self, state: &u64) -> Vec<u64> {
            vec![2 * state, 2 * state + 1]
        }

        fn result(&self, _state: &u64, action: &u64) -> u64 {
            *action
        }

        fn is_goal(&self, state: &u64) -> bool {
            *state == self.goal
        }
    }

    #[test]
    fn test_finds_shallowest_goal() {
        let tree = Tree { goal: 11 }; // 1 -> 2 -> 5 -> 11
        let mut ids = IterativeDeepening::new(&tree, DepthConfig::default()).unwrap();

        let path = ids.search();
        assert_eq!(path.actions().copied().collect::<Vec<_>>(), vec![2, 5, 11]);
        assert_eq!(ids.stats().iterations, 3);
    }

    #[test]
    fn test_ceiling_exhausted() {
        let tree = Tree { goal: 1 << 10 };
        let config = DepthConfig::default().with_max_depth(4);
        let mut ids = IterativeDeepening::new(&tree, config).unwrap();

        assert!(ids.search().is_empty());
        assert_eq!(ids.stats().iterations, 4);
    }

    #[test]
    fn test_initial_goal() {
        let tree = Tree { goal: 1 };
        let mut ids = IterativeDeepening::new(&tree, DepthConfig::default()).unwrap();

        let path = ids.search();
        assert!(path.is_found());
        assert_eq!(path.len(), 0);
    }

    #[test]
    fn test_zero_ceiling_is_config_error() {
        let tree = Tree { goal: 1 };
        let config = DepthConfig::default().with_max_depth(0);
        assert!(IterativeDeepening::new(&tree, config).is_err());
    }
}
