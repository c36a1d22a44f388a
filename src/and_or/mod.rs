//! AND-OR search for problems whose actions have uncertain outcomes.
//!
//! The result is a [`ConditionalPlan`]: a tree that names the action to take
//! and, for each outcome the environment may pick, the plan to follow next.
//! Deterministic problems can be searched through
//! [`Deterministic`](crate::core::Deterministic), in which case the plan
//! degenerates to a path.

pub mod plan;
pub mod search;

pub use plan::{Branches, ConditionalPlan};
pub use search::{AndOrSearch, PROBABILITY_TOLERANCE};
