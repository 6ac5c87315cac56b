//! Error kinds shared by every vQL crate.

use thiserror::Error;

/// Result type used where a crate has no richer error of its own.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that cut across the whole workspace (identifier parsing, shard
/// bounds, and the one storage failure kind every crate's own error enum
/// folds into via `From`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An identifier failed to parse or was out of range.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A shard index fell outside `[0, ShardDivide)`.
    #[error("shard index {0} out of range")]
    ShardOutOfRange(u64),

    /// A transactional store operation (begin/commit/rollback/query) failed.
    #[error("query execute failed: {0}")]
    QueryExecuteFailed(String),
}

impl CoreError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn query_failed(msg: impl Into<String>) -> Self {
        Self::QueryExecuteFailed(msg.into())
    }
}
