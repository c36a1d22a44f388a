//! Core types: the problem contract, path steps, errors, RNG, caching, stats.
//!
//! This module contains the building blocks every algorithm family shares.
//! Problems implement the traits in `problem`; the algorithms only ever see
//! states and actions through them.

pub mod cache;
pub mod error;
pub mod problem;
pub mod rng;
pub mod stats;
pub mod step;

pub use cache::StateCache;
pub use error::{SearchError, SearchResult};
pub use problem::{
    Deterministic, GameProblem, GeneticProblem, HeuristicProblem, Player, SearchProblem,
    UncertainProblem,
};
pub use rng::SearchRng;
pub use stats::SearchStats;
pub use step::{Path, Step};
