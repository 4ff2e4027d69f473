//! Codec error types

use thiserror::Error;

use super::Format;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Prefix of every import error message
pub const IMPORT_ERROR_PREFIX: &str = "Error importing players";

/// Prefix of every export error message
pub const EXPORT_ERROR_PREFIX: &str = "Error exporting players";

/// Import or export failure for one file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Error importing players from {format}: {reason}")]
    Import { format: Format, reason: String },

    #[error("Error exporting players to {format}: {reason}")]
    Export { format: Format, reason: String },
}

impl CodecError {
    /// Create an import error
    pub fn import(format: Format, reason: impl Into<String>) -> Self {
        Self::Import {
            format,
            reason: reason.into(),
        }
    }

    /// Create an export error
    pub fn export(format: Format, reason: impl Into<String>) -> Self {
        Self::Export {
            format,
            reason: reason.into(),
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::Import { .. } => "IMPORT_ERROR",
            CodecError::Export { .. } => "EXPORT_ERROR",
        }
    }

    /// Format the failing codec handles
    pub fn format(&self) -> Format {
        match self {
            CodecError::Import { format, .. } | CodecError::Export { format, .. } => *format,
        }
    }
}
