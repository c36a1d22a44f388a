//! Depth-limited minimax with optional alpha-beta pruning.

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::core::{GameProblem, Player, SearchResult, SearchStats};

use super::config::MinimaxConfig;

/// Minimax search context.
///
/// The side to move is asked from the problem at every node, so games where
/// a player may move twice in a row are handled without special casing.
pub struct Minimax<'p, P: GameProblem> {
    problem: &'p P,
    config: MinimaxConfig,
    value: Option<f64>,
    stats: SearchStats,
}

impl<'p, P: GameProblem> Minimax<'p, P> {
    /// Create a new search context. Fails if the depth is zero.
    pub fn new(problem: &'p P, config: MinimaxConfig) -> SearchResult<Self> {
        config
            .validate()
            .inspect_err(|e| warn!(%e, "rejected minimax config"))?;
        Ok(Self {
            problem,
            config,
            value: None,
            stats: SearchStats::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }

    #[must_use]
    pub fn problem(&self) -> &'p P {
        self.problem
    }

    /// Choose an action for the side to move in the initial state.
    pub fn search(&mut self) -> Option<P::Action> {
        let state = self.problem.initial_state();
        self.best_action(&state)
    }

    /// Choose an action for the side to move in `state`.
    ///
    /// Returns `None` for finished games and states without actions. Among
    /// equally valued actions the first one in `actions` order wins.
    pub fn best_action(&mut self, state: &P::State) -> Option<P::Action> {
        let start = Instant::now();
        self.stats.reset();
        self.value = None;

        let problem = self.problem;
        if problem.is_goal(state) {
            return None;
        }

        let player = problem.to_move(state);
        let depth = self.config.depth - 1;
        let (mut alpha, mut beta) = (f64::NEG_INFINITY, f64::INFINITY);
        let mut best: Option<(P::Action, f64)> = None;

        self.stats.nodes_expanded += 1;
        for action in problem.actions(state) {
            let child = problem.result(state, &action);
            self.stats.nodes_generated += 1;
            let value = self.evaluate(&child, depth, alpha, beta);
            trace!(?action, value, "root action evaluated");

            let better = match (&best, player) {
                (None, _) => true,
                (Some((_, v)), Player::Max) => value > *v,
                (Some((_, v)), Player::Min) => value < *v,
            };
            if better {
                best = Some((action, value));
            }

            if self.config.pruning {
                let v = best.as_ref().map_or(value, |(_, v)| *v);
                match player {
                    Player::Max => alpha = alpha.max(v),
                    Player::Min => beta = beta.min(v),
                }
            }
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        self.value = best.as_ref().map(|(_, v)| *v);
        debug!(
            ?player,
            depth = self.config.depth,
            pruning = self.config.pruning,
            value = ?self.value,
            visited = self.stats.nodes_expanded,
            pruned = self.stats.pruned,
            "minimax finished"
        );
        best.map(|(action, _)| action)
    }

    fn evaluate(&mut self, state: &P::State, depth: u32, mut alpha: f64, mut beta: f64) -> f64 {
        self.stats.nodes_expanded += 1;
        let problem = self.problem;

        if depth == 0 || problem.is_goal(state) {
            return problem.heuristic(state);
        }
        let actions = problem.actions(state);
        if actions.is_empty() {
            return problem.heuristic(state);
        }

        match problem.to_move(state) {
            Player::Max => {
                let mut value = f64::NEG_INFINITY;
                for action in actions {
                    let child = problem.result(state, &action);
                    self.stats.nodes_generated += 1;
                    value = value.max(self.evaluate(&child, depth - 1, alpha, beta));
                    if self.config.pruning {
                        if value >= beta {
                            self.stats.pruned += 1;
                            break;
                        }
                        alpha = alpha.max(value);
                    }
                }
                value
            }
            Player::Min => {
                let mut value = f64::INFINITY;
                for action in actions {
                    let child = problem.result(state, &action);
                    self.stats.nodes_generated += 1;
                    value = value.min(self.evaluate(&child, depth - 1, alpha, beta));
                    if self.config.pruning {
                        if value <= alpha {
                            self.stats.pruned += 1;
                            break;
                        }
                        beta = beta.min(value);
                    }
                }
                value
            }
        }
    }

    /// Minimax value of the action chosen by the last search, from `Max`'s
    /// point of view.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Counters from the last search. `nodes_expanded` counts visited nodes
    /// and `pruned` the cut-offs.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HeuristicProblem, SearchProblem};

    /// Textbook two-ply tree: Max picks one of three Min nodes with leaves
    /// (3, 12, 8), (2, 4, 6), (14, 5, 2). Minimax value is 3 via the first.
    struct TwoPly;

    const LEAVES: [[f64; 3]; 3] = [[3.0, 12.0, 8.0], [2.0, 4.0, 6.0], [14.0, 5.0, 2.0]];

    // State: path of choices from the root
    impl SearchProblem for TwoPly {
        type State = Vec<usize>;
        type Action = usize;

        fn initial_state(&self) -> Vec<usize> {
            vec![]
        }

        fn actions(&self, state: &Vec<usize>) -> Vec<usize> {
            if state.len() < 2 {
                vec![0, 1, 2]
            } else {
                vec![]
            }
        }

        fn result(&self, state: &Vec<usize>, action: &usize) -> Vec<usize> {
            let mut next = state.clone();
            next.push(*action);
            next
        }

        fn is_goal(&self, state: &Vec<usize>) -> bool {
            state.len() == 2
        }
    }

    impl HeuristicProblem for TwoPly {
        fn heuristic(&self, state: &Vec<usize>) -> f64 {
            match state.as_slice() {
                [a, b] => LEAVES[*a][*b],
                _ => 0.0,
            }
        }
    }

    impl GameProblem for TwoPly {
        fn to_move(&self, state: &Vec<usize>) -> Player {
            if state.len() % 2 == 0 {
                Player::Max
            } else {
                Player::Min
            }
        }
    }

    #[test]
    fn test_textbook_tree() {
        for pruning in [false, true] {
            let config = MinimaxConfig::default().with_depth(2).with_pruning(pruning);
            let mut search = Minimax::new(&TwoPly, config).unwrap();

            assert_eq!(search.search(), Some(0));
            assert_eq!(search.value(), Some(3.0));
        }
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let mut plain = Minimax::new(&TwoPly, MinimaxConfig::default().with_pruning(false)).unwrap();
        let mut pruned = Minimax::new(&TwoPly, MinimaxConfig::default()).unwrap();
        plain.search();
        pruned.search();

        assert_eq!(plain.stats().nodes_expanded, 13);
        assert_eq!(plain.stats().pruned, 0);
        assert!(pruned.stats().nodes_expanded < 13);
        // Second Min node is cut after its first leaf (2 <= 3)
        assert!(pruned.stats().pruned >= 1);
    }

    #[test]
    fn test_depth_one_uses_heuristic() {
        let config = MinimaxConfig::default().with_depth(1);
        let mut search = Minimax::new(&TwoPly, config).unwrap();

        // All children score 0 at the cutoff; first-found wins
        assert_eq!(search.search(), Some(0));
        assert_eq!(search.value(), Some(0.0));
    }

    #[test]
    fn test_finished_game_has_no_action() {
        let mut search = Minimax::new(&TwoPly, MinimaxConfig::default()).unwrap();
        assert_eq!(search.best_action(&vec![1, 1]), None);
        assert_eq!(search.value(), None);
    }

    #[test]
    fn test_min_to_move() {
        let mut search = Minimax::new(&TwoPly, MinimaxConfig::default()).unwrap();
        // Min picks the smallest leaf under the third node
        assert_eq!(search.best_action(&vec![2]), Some(2));
        assert_eq!(search.value(), Some(2.0));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let config = MinimaxConfig::default().with_depth(0);
        assert!(Minimax::new(&TwoPly, config).is_err());
    }
}
