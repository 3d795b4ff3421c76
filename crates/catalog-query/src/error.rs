//! Query error types.

use thiserror::Error;

/// Errors that can occur while interpreting a query request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A sort key name outside the known orderings.
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
