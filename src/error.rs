//! Error types for the stampfs cache-busting system.

use thiserror::Error;

/// Errors surfaced by hashing, materialization, and store operations.
///
/// No error is recovered internally: the first failure aborts the enclosing
/// operation and any partially built map must be discarded by the caller.
#[derive(Debug, Error)]
pub enum StampError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
