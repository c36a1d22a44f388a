//! Minimax configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::{SearchError, SearchResult};

/// Minimax configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinimaxConfig {
    /// Search depth in plies. Must be at least 1.
    pub depth: u32,

    /// Alpha-beta pruning. Disabling it gives plain minimax, which visits
    /// every node up to `depth` and returns the same action.
    pub pruning: bool,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            pruning: true,
        }
    }
}

impl MinimaxConfig {
    /// Create a new config with custom depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Create a new config with pruning on or off.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn validate(&self) -> SearchResult<()> {
        if self.depth == 0 {
            return Err(SearchError::invalid("depth", "must be at least 1 ply"));
        }
        Ok(())
    }
}
