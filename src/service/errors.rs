//! Record service error types
//!
//! Error codes:
//! - PLAYER_INVALID (validation failed, nothing written)
//! - PLAYER_ALREADY_EXISTS (save hit an existing key)
//! - PLAYER_NOT_FOUND (no active record for the key)
//! - PLAYER_STORAGE_FAILURE (the repository accepted a write but returned nothing)

use thiserror::Error;

use crate::validator::ValidationError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("Player is not valid: {0}")]
    InvalidRecord(#[from] ValidationError),

    #[error("Player with id {id} already exists")]
    AlreadyExists { id: i64 },

    #[error("Player with id {id} does not exist")]
    DoesNotExist { id: i64 },

    #[error("Storage failed to {operation} player with id {id}")]
    StorageFailure { id: i64, operation: &'static str },
}

impl ServiceError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidRecord(_) => "PLAYER_INVALID",
            ServiceError::AlreadyExists { .. } => "PLAYER_ALREADY_EXISTS",
            ServiceError::DoesNotExist { .. } => "PLAYER_NOT_FOUND",
            ServiceError::StorageFailure { .. } => "PLAYER_STORAGE_FAILURE",
        }
    }
}
