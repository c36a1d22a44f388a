//! Depth-bounded search configuration.

use serde::{Deserialize, Serialize};

use crate::core::{SearchError, SearchResult};

/// Configuration for iterative deepening.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepthConfig {
    /// Deepest bound tried (inclusive). Must be at least 1.
    pub max_depth: usize,
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

impl DepthConfig {
    /// Create a new config with a custom depth ceiling.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Check the ceiling before any search work starts.
    pub fn validate(&self) -> SearchResult<()> {
        if self.max_depth == 0 {
            return Err(SearchError::invalid("max_depth", "must be at least 1"));
        }
        Ok(())
    }
}
