//! Local and stochastic search.
//!
//! These algorithms keep one current state (or a small set of them) instead
//! of a frontier, and move it toward lower heuristic values. Success is not
//! guaranteed: a search may stop in a local optimum, on a plateau or when
//! its iteration budget runs out, and then reports `false`.
//!
//! Every algorithm implements [`LocalSearch`], so any of them can be wrapped
//! by [`RandomRestart`].

pub mod acceptance;
pub mod beam;
pub mod config;
pub mod genetic;
pub mod hill_climbing;
pub mod restart;
pub mod stochastic;

#[cfg(test)]
mod testing;

use crate::core::{HeuristicProblem, SearchProblem, SearchStats};

pub use acceptance::{Acceptance, Annealing, Constant, FirstChoice};
pub use beam::LocalBeamSearch;
pub use config::{AnnealingConfig, BeamConfig, GeneticConfig, LocalConfig, RestartConfig};
pub use genetic::GeneticAlgorithm;
pub use hill_climbing::HillClimbing;
pub use restart::RandomRestart;
pub use stochastic::{FirstChoiceHillClimbing, SimulatedAnnealing, StochasticHillClimbing};

/// Common interface of the local search family.
///
/// `search` continues from the current state; `reset` puts the algorithm
/// back at a given state with zero cost.
pub trait LocalSearch {
    type Problem: HeuristicProblem;

    /// Run until success, a stopping condition or the iteration budget.
    /// Returns whether the final state is a goal.
    fn search(&mut self) -> bool;

    /// The current (after `search`, the final) state.
    fn state(&self) -> &<Self::Problem as SearchProblem>::State;

    /// Cost accumulated since the last reset.
    fn cost(&self) -> f64;

    /// Restart from `state` with zero cost and fresh internal schedules.
    fn reset(&mut self, state: <Self::Problem as SearchProblem>::State);

    /// The problem this algorithm is bound to.
    fn problem(&self) -> &Self::Problem;

    /// Counters from the last `search` call.
    fn stats(&self) -> &SearchStats;
}
