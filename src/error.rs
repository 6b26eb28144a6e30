//! Error types for the session store and its persistence layer

use thiserror::Error;

/// Rejections returned by store operations.
///
/// A rejected operation never leaves a partial mutation behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Invalid operator input (empty name, non-positive duration, out of range field)
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The referenced session does not exist
    #[error("Session '{0}' not found")]
    NotFound(String),
}

/// Failures inside the persistence adapter.
///
/// These never reach store callers: loads recover to an empty state and
/// failed writes are logged.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to read/write key-value storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize sessions: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored sessions are inconsistent: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type PersistenceResult<T> = Result<T, PersistenceError>;
