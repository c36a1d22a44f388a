//! The problem contract every search algorithm depends on.
//!
//! Problems implement these traits to describe their state space:
//! - What the start state is
//! - Which actions are legal in a state
//! - Where an action leads (one state, or a distribution over states)
//! - Which states are goals, and what actions cost
//!
//! The engine never interprets states or actions. It only hashes, compares
//! and clones them, and it never mutates a state after receiving it.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::rng::SearchRng;
use super::step::Step;

/// A deterministic search problem.
///
/// ## Implementation Notes
///
/// - `actions`: Return an empty vec for terminal or dead-end states
/// - `result`: Must be a pure function of its arguments
/// - `is_goal`: Must be a pure predicate
/// - `action_cost`: Must be non-negative for the optimality guarantees of
///   Dijkstra and A*
pub trait SearchProblem {
    /// One configuration of the problem. Compared and hashed by value.
    type State: Clone + Eq + Hash + Ord + Debug;

    /// A transition label.
    type Action: Clone + Eq + Hash + Debug;

    /// The state the search starts from.
    fn initial_state(&self) -> Self::State;

    /// Legal actions in `state`.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The state reached by taking `action` in `state`.
    fn result(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Whether `state` solves the problem.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Cost of taking `action` in `state`.
    fn action_cost(&self, _state: &Self::State, _action: &Self::Action) -> f64 {
        1.0
    }

    /// Apply a path step. `Step::Stay` returns the same state.
    fn apply(&self, state: &Self::State, step: &Step<Self::Action>) -> Self::State {
        match step {
            Step::Stay => state.clone(),
            Step::Act(action) => self.result(state, action),
        }
    }
}

/// A problem with a heuristic estimate of the remaining cost.
pub trait HeuristicProblem: SearchProblem {
    /// Estimated cost from `state` to the nearest goal.
    ///
    /// A* is only optimal if this never overestimates. The engine does not
    /// check that.
    fn heuristic(&self, state: &Self::State) -> f64;

    /// Draw a fresh starting state.
    ///
    /// Used by random restarts, beam search and genetic populations. The
    /// default returns the initial state, which makes restarts pointless;
    /// problems with a natural random state should override it.
    fn sample_state(&self, _rng: &mut SearchRng) -> Self::State {
        self.initial_state()
    }
}

/// A problem whose actions have non-deterministic outcomes.
pub trait UncertainProblem {
    type State: Clone + Eq + Hash + Ord + Debug;
    type Action: Clone + Eq + Hash + Debug;

    fn initial_state(&self) -> Self::State;

    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Possible successors of `action` in `state` with their probabilities.
    ///
    /// Probabilities must be non-negative and sum to 1. Outcomes with zero
    /// probability are ignored.
    fn outcomes(&self, state: &Self::State, action: &Self::Action) -> Vec<(Self::State, f64)>;

    fn is_goal(&self, state: &Self::State) -> bool;

    fn action_cost(&self, _state: &Self::State, _action: &Self::Action) -> f64 {
        1.0
    }
}

/// Views a deterministic problem as an uncertain one with a single outcome.
#[derive(Clone, Copy, Debug)]
pub struct Deterministic<'p, P>(pub &'p P);

impl<P: SearchProblem> UncertainProblem for Deterministic<'_, P> {
    type State = P::State;
    type Action = P::Action;

    fn initial_state(&self) -> Self::State {
        self.0.initial_state()
    }

    fn actions(&self, state: &Self::State) -> Vec<Self::Action> {
        self.0.actions(state)
    }

    fn outcomes(&self, state: &Self::State, action: &Self::Action) -> Vec<(Self::State, f64)> {
        vec![(self.0.result(state, action), 1.0)]
    }

    fn is_goal(&self, state: &Self::State) -> bool {
        self.0.is_goal(state)
    }

    fn action_cost(&self, state: &Self::State, action: &Self::Action) -> f64 {
        self.0.action_cost(state, action)
    }
}

/// The side to move in a two-player zero-sum game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Prefers high heuristic values.
    Max,
    /// Prefers low heuristic values.
    Min,
}

impl Player {
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Player::Max => Player::Min,
            Player::Min => Player::Max,
        }
    }
}

/// A two-player, zero-sum, perfect-information game.
///
/// `is_goal` marks finished games and `heuristic` scores positions from
/// `Max`'s point of view (positive favors `Max`).
pub trait GameProblem: HeuristicProblem {
    /// The side to move in `state`.
    fn to_move(&self, state: &Self::State) -> Player;
}

/// Genetic operators for the genetic algorithm.
///
/// There are no defaults: crossover and mutation depend on how the problem
/// encodes its states.
pub trait GeneticProblem: HeuristicProblem {
    /// Combine two parents into one child.
    fn crossover(&self, a: &Self::State, b: &Self::State, rng: &mut SearchRng) -> Self::State;

    /// Randomly perturb a state.
    fn mutate(&self, state: &Self::State, rng: &mut SearchRng) -> Self::State;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Counter that must reach a target; +1 and +2 moves
    struct Counter {
        target: u32,
    }

    impl SearchProblem for Counter {
        type State = u32;
        type Action = u32;

        fn initial_state(&self) -> u32 {
            0
        }

        fn actions(&self, state: &u32) -> Vec<u32> {
            if *state >= self.target {
                vec![]
            } else {
                vec![1, 2]
            }
        }

        fn result(&self, state: &u32, action: &u32) -> u32 {
            state + action
        }

        fn is_goal(&self, state: &u32) -> bool {
            *state == self.target
        }
    }

    #[test]
    fn test_default_action_cost() {
        let p = Counter { target: 3 };
        assert_eq!(p.action_cost(&0, &2), 1.0);
    }

    #[test]
    fn test_apply_stay_is_identity() {
        let p = Counter { target: 3 };
        assert_eq!(p.apply(&2, &Step::Stay), 2);
        assert_eq!(p.apply(&2, &Step::Act(1)), 3);
    }

    #[test]
    fn test_deterministic_adapter() {
        let p = Counter { target: 3 };
        let u = Deterministic(&p);

        assert_eq!(u.initial_state(), 0);
        assert_eq!(u.actions(&0), vec![1, 2]);
        assert_eq!(u.outcomes(&1, &2), vec![(3, 1.0)]);
        assert!(u.is_goal(&3));
        assert_eq!(u.action_cost(&0, &1), 1.0);
    }

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::Max.opponent(), Player::Min);
        assert_eq!(Player::Min.opponent(), Player::Max);
    }
}
