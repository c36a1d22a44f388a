//! Typed search errors.
//!
//! A search that runs out of frontier or budget is *not* an error: it returns
//! an empty path, `None` or `false`. `SearchError` covers the two other
//! cases: configuration mistakes caught before any work starts, and contract
//! violations by a problem implementation that are cheap to detect.

use thiserror::Error;

/// Configuration errors and detectable contract violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A composite algorithm wraps an algorithm bound to another problem.
    #[error("wrapped algorithm is bound to a different problem instance")]
    ProblemMismatch,

    /// A numeric or size parameter is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// A frontier discipline name could not be parsed.
    #[error("unknown frontier discipline `{0}` (expected fifo, lifo or priority)")]
    UnknownDiscipline(String),

    /// An uncertain transition returned an unusable distribution.
    #[error("invalid outcome distribution for {context}: {reason}")]
    InvalidDistribution { context: String, reason: String },
}

impl SearchError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias.
pub type SearchResult<T> = Result<T, SearchError>;
