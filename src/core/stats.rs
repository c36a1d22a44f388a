//! Search statistics for diagnostics and algorithm comparison.

use serde::{Deserialize, Serialize};

/// Counters collected during one search.
///
/// Not every algorithm fills every field: frontier search counts expansions
/// and frontier size, minimax counts visited nodes and prunes, local search
/// counts iterations and accepted/rejected moves.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// States whose successors were generated.
    pub nodes_expanded: u64,

    /// Successor states produced (including duplicates that were dropped).
    pub nodes_generated: u64,

    /// Largest frontier size observed.
    pub max_frontier: usize,

    /// Main-loop iterations (local search steps, deepening rounds, generations).
    pub iterations: u64,

    /// Moves taken by a local search.
    pub accepted: u64,

    /// Moves a stochastic local search sampled and refused.
    pub rejected: u64,

    /// Subtrees cut off by alpha-beta pruning.
    pub pruned: u64,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record the current frontier size.
    pub(crate) fn observe_frontier(&mut self, len: usize) {
        if len > self.max_frontier {
            self.max_frontier = len;
        }
    }

    /// Add another search's counters into this one.
    pub fn absorb(&mut self, other: &SearchStats) {
        self.nodes_expanded += other.nodes_expanded;
        self.nodes_generated += other.nodes_generated;
        self.max_frontier = self.max_frontier.max(other.max_frontier);
        self.iterations += other.iterations;
        self.accepted += other.accepted;
        self.rejected += other.rejected;
        self.pruned += other.pruned;
        self.time_us += other.time_us;
    }

    /// Calculate expansions per second.
    #[must_use]
    pub fn expansions_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes_expanded as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Average successors generated per expansion.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.nodes_expanded == 0 {
            0.0
        } else {
            self.nodes_generated as f64 / self.nodes_expanded as f64
        }
    }

    /// Fraction of sampled moves that were accepted.
    #[must_use]
    pub fn acceptance_rate(&self) -> f64 {
        let sampled = self.accepted + self.rejected;
        if sampled == 0 {
            0.0
        } else {
            self.accepted as f64 / sampled as f64
        }
    }
}
