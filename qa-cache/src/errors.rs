//! Error type for cache stores.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QaCacheError {
    /// Database driver or connection failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be turned into an entry.
    #[error("corrupt cache row {id}: {reason}")]
    Decode { id: i64, reason: String },

    /// Creating the database directory failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
