//! Adversarial search for two-player zero-sum games.
//!
//! [`Minimax`] searches a fixed number of plies, scoring cut-off and
//! finished positions with the problem's heuristic from `Max`'s point of
//! view. Alpha-beta pruning is on by default and never changes the chosen
//! action.

pub mod config;
pub mod minimax;

pub use config::MinimaxConfig;
pub use minimax::Minimax;
