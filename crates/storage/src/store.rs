//! The session store trait and its error type

use async_trait::async_trait;
use thiserror::Error;

/// Storage error types
#[derive(Debug, Error)]
pub enum StoreError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Stored bytes were not valid UTF-8
    #[error("Corrupt value for key {key}")]
    Corrupt {
        /// The key whose value could not be decoded
        key: String,
    },

    /// Backend reported a failure (used by test doubles)
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Async key-value store for session data.
///
/// The authentication core reads and writes a small fixed set of keys
/// through this trait; implementations are trusted to complete or fail
/// each operation as a whole.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key`. Returns whether a value was present.
    async fn remove(&self, key: &str) -> Result<bool>;
}
