//! Local beam search.

use std::time::Instant;

use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

use crate::core::{HeuristicProblem, SearchResult, SearchRng, SearchStats};

use super::config::{BeamConfig, LocalConfig};
use super::LocalSearch;

/// A beam member: state, cost accumulated along its lineage, heuristic.
type Member<S> = (S, f64, f64);

/// Keeps the `k` best states among all successors of the current `k`.
///
/// The beam is kept sorted by heuristic, best first. Each iteration pools the
/// successors of every member in generation order, sorts them stably, drops
/// duplicates and keeps the first `k`. The search stops when a member is a
/// goal, when no successor beats the best member, or when the budget runs
/// out. A stalled pool is still checked for goals before giving up. With `k = 1` this is exactly [`HillClimbing`](super::HillClimbing).
pub struct LocalBeamSearch<'p, P: HeuristicProblem> {
    problem: &'p P,
    config: LocalConfig,
    beam_config: BeamConfig,
    rng: SearchRng,
    beam: Vec<Member<P::State>>,
    stats: SearchStats,
}

impl<'p, P: HeuristicProblem> LocalBeamSearch<'p, P> {
    /// Start from the initial state plus `k - 1` sampled states.
    pub fn new(problem: &'p P, config: LocalConfig, beam_config: BeamConfig) -> SearchResult<Self> {
        config
            .validate()
            .and_then(|()| beam_config.validate())
            .inspect_err(|e| warn!(%e, "rejected beam search config"))?;

        let mut search = Self {
            problem,
            rng: SearchRng::new(config.seed),
            config,
            beam_config,
            beam: Vec::new(),
            stats: SearchStats::default(),
        };
        search.reset(problem.initial_state());
        Ok(search)
    }

    #[must_use]
    pub fn beam_width(&self) -> usize {
        self.beam_config.beam_width
    }

    /// Current beam members, best first.
    pub fn members(&self) -> impl Iterator<Item = &P::State> {
        self.beam.iter().map(|(state, _, _)| state)
    }

    fn successors(&mut self) -> Vec<Member<P::State>> {
        let problem = self.problem;
        let mut pool = Vec::new();
        for (state, cost, _) in &self.beam {
            self.stats.nodes_expanded += 1;
            for action in problem.actions(state) {
                let next = problem.result(state, &action);
                let h = problem.heuristic(&next);
                pool.push((next, cost + problem.action_cost(state, &action), h));
            }
        }
        self.stats.nodes_generated += pool.len() as u64;
        pool
    }

    /// Move the first goal member to the front, if any.
    fn promote_goal(&mut self) -> bool {
        let problem = self.problem;
        match self.beam.iter().position(|(s, _, _)| problem.is_goal(s)) {
            Some(i) => {
                self.beam[..=i].rotate_right(1);
                true
            }
            None => false,
        }
    }
}

impl<P: HeuristicProblem> LocalSearch for LocalBeamSearch<'_, P> {
    type Problem = P;

    fn search(&mut self) -> bool {
        let start = Instant::now();
        self.stats.reset();
        let k = self.beam_config.beam_width;

        for _ in 0..self.config.max_iter {
            if self.promote_goal() {
                break;
            }
            self.stats.iterations += 1;

            let mut pool = self.successors();
            if pool.is_empty() {
                break;
            }
            pool.sort_by(|a, b| a.2.total_cmp(&b.2));

            let mut seen = FxHashSet::default();
            pool.retain(|(s, _, _)| seen.insert(s.clone()));
            pool.truncate(k);

            let best_current = self.beam[0].2;
            if pool[0].2 >= best_current {
                // A goal can survive without beating the best member when
                // the heuristic is not exact at goals
                let problem = self.problem;
                if pool.iter().any(|(s, _, _)| problem.is_goal(s)) {
                    self.stats.accepted += 1;
                    self.beam = pool;
                    break;
                }
                trace!(best_current, best_successor = pool[0].2, "beam stalled");
                break;
            }

            trace!(best = pool[0].2, width = pool.len(), "beam advanced");
            self.stats.accepted += 1;
            self.beam = pool;
        }

        let solved = self.promote_goal();
        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            solved,
            k,
            iterations = self.stats.iterations,
            best = self.beam[0].2,
            "local beam search finished"
        );
        solved
    }

    fn state(&self) -> &P::State {
        &self.beam[0].0
    }

    fn cost(&self) -> f64 {
        self.beam[0].1
    }

    /// Restart from `state` plus up to `k - 1` freshly sampled distinct
    /// states.
    fn reset(&mut self, state: P::State) {
        let problem = self.problem;
        let k = self.beam_config.beam_width;

        let h = problem.heuristic(&state);
        self.beam.clear();
        self.beam.push((state, 0.0, h));
        // Small state spaces may not have k distinct states to offer
        let mut attempts = 4 * k;
        while self.beam.len() < k && attempts > 0 {
            attempts -= 1;
            let sampled = problem.sample_state(&mut self.rng);
            if self.beam.iter().any(|(s, _, _)| *s == sampled) {
                continue;
            }
            let h = problem.heuristic(&sampled);
            self.beam.push((sampled, 0.0, h));
        }
        self.beam.sort_by(|a, b| a.2.total_cmp(&b.2));
    }

    fn problem(&self) -> &P {
        self.problem
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SearchProblem;
    use crate::local::testing::Landscape;
    use crate::local::HillClimbing;

    fn land() -> Landscape {
        Landscape::new(&[0.0, 3.0, 5.0, 1.0, 2.0, 4.0, 6.0, 2.0], 6)
    }

    #[test]
    fn test_width_one_matches_hill_climbing() {
        let land = land();
        for start in 0..land.heights.len() {
            let mut hc = HillClimbing::new(&land, LocalConfig::default()).unwrap();
            hc.reset(start);
            let mut beam =
                LocalBeamSearch::new(&land, LocalConfig::default(), BeamConfig::default().with_beam_width(1))
                    .unwrap();
            beam.reset(start);

            assert_eq!(beam.search(), hc.search());
            assert_eq!(beam.state(), hc.state());
            assert_eq!(beam.cost(), hc.cost());
        }
    }

    #[test]
    fn test_wide_beam_escapes_local_minimum() {
        let land = land();
        // Starting at 6 a single climber stops at 3; sampled members may not.
        let found = (0..10).any(|seed| {
            let config = LocalConfig::default().with_seed(seed);
            let mut beam =
                LocalBeamSearch::new(&land, config, BeamConfig::default().with_beam_width(4)).unwrap();
            beam.search()
        });
        assert!(found);
    }

    #[test]
    fn test_members_are_distinct_and_sorted() {
        let land = land();
        let config = LocalConfig::default().with_max_iter(1);
        let mut beam =
            LocalBeamSearch::new(&land, config, BeamConfig::default().with_beam_width(3)).unwrap();
        beam.search();

        let members: Vec<usize> = beam.members().copied().collect();
        let mut unique = members.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), members.len());

        let heights: Vec<f64> = members.iter().map(|s| land.heuristic(s)).collect();
        assert!(heights.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_success_means_goal() {
        let land = land();
        for seed in 0..10 {
            let config = LocalConfig::default().with_seed(seed);
            let mut beam =
                LocalBeamSearch::new(&land, config, BeamConfig::default()).unwrap();
            if beam.search() {
                assert!(land.is_goal(beam.state()));
            }
        }
    }

    /// Three cells in a row; the middle one scores as well as the goal
    /// without being it.
    struct Plateau;

    impl SearchProblem for Plateau {
        type State = usize;
        type Action = isize;

        fn initial_state(&self) -> usize {
            1
        }
        fn actions(&self, state: &usize) -> Vec<isize> {
            match state {
                0 => vec![1],
                2 => vec![-1],
                _ => vec![-1, 1],
            }
        }
        fn result(&self, state: &usize, action: &isize) -> usize {
            state.saturating_add_signed(*action)
        }
        fn is_goal(&self, state: &usize) -> bool {
            *state == 2
        }
    }

    impl HeuristicProblem for Plateau {
        fn heuristic(&self, state: &usize) -> f64 {
            [1.0, 0.0, 0.0][*state]
        }
    }

    #[test]
    fn test_goal_on_plateau_is_kept() {
        let config = BeamConfig::default().with_beam_width(1);
        let mut beam = LocalBeamSearch::new(&Plateau, LocalConfig::default(), config).unwrap();

        assert!(beam.search());
        assert_eq!(*beam.state(), 2);
        assert_eq!(beam.cost(), 1.0);
        assert_eq!(beam.stats().iterations, 1);
    }
}
