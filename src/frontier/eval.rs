//! Evaluation strategies for the priority frontier.
//!
//! Each best-first variant is the same search with a different strategy:
//! - `Unscored`: no score; used with FIFO/LIFO (BFS, DFS)
//! - `PathCost`: accumulated cost `g` (Dijkstra)
//! - `Greedy`: heuristic of the successor `h` (greedy best-first)
//! - `WeightedAStar`: `g + w * h` (A*, weighted A*)

use serde::{Deserialize, Serialize};

use crate::core::{HeuristicProblem, SearchError, SearchProblem, SearchResult};

/// One generated edge, as seen by an evaluator.
#[derive(Debug)]
pub struct Transition<'a, S, A> {
    pub parent: &'a S,
    pub action: &'a A,
    pub child: &'a S,
    /// Accumulated path cost from the initial state to `child`.
    pub path_cost: f64,
    /// Number of actions from the initial state to `child`.
    pub depth: usize,
}

/// Scores a generated successor. Lower scores leave the frontier first.
pub trait Evaluator<P: SearchProblem> {
    fn score(&self, problem: &P, transition: &Transition<'_, P::State, P::Action>) -> f64;

    /// Whether scores are meaningful, i.e. the strategy needs the priority
    /// discipline.
    fn is_scored(&self) -> bool {
        true
    }
}

/// No evaluation; pairs with FIFO or LIFO frontiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Unscored;

impl<P: SearchProblem> Evaluator<P> for Unscored {
    fn score(&self, _problem: &P, _transition: &Transition<'_, P::State, P::Action>) -> f64 {
        0.0
    }

    fn is_scored(&self) -> bool {
        false
    }
}

/// Accumulated path cost (uniform-cost search).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathCost;

impl<P: SearchProblem> Evaluator<P> for PathCost {
    fn score(&self, _problem: &P, transition: &Transition<'_, P::State, P::Action>) -> f64 {
        transition.path_cost
    }
}

/// Heuristic of the successor only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Greedy;

impl<P: HeuristicProblem> Evaluator<P> for Greedy {
    fn score(&self, problem: &P, transition: &Transition<'_, P::State, P::Action>) -> f64 {
        problem.heuristic(transition.child)
    }
}

/// `g + weight * h`. Weight 1 is standard A*; larger weights search greedier
/// and may return suboptimal paths.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedAStar {
    weight: f64,
}

impl WeightedAStar {
    /// Create the strategy. The weight must be finite and non-negative.
    pub fn new(weight: f64) -> SearchResult<Self> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(SearchError::invalid(
                "weight",
                format!("must be finite and non-negative, got {weight}"),
            ));
        }
        Ok(Self { weight })
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl Default for WeightedAStar {
    fn default() -> Self {
        Self { weight: 1.0 }
    }
}

impl<P: HeuristicProblem> Evaluator<P> for WeightedAStar {
    fn score(&self, problem: &P, transition: &Transition<'_, P::State, P::Action>) -> f64 {
        transition.path_cost + self.weight * problem.heuristic(transition.child)
    }
}
