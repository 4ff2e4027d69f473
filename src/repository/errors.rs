//! Repository setup errors
//!
//! Only opening and provisioning the store can fail loudly. Per-record
//! operations log and return `None`.

use thiserror::Error;

/// Result type for repository setup
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository setup errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database connection lock poisoned")]
    LockPoisoned,
}
