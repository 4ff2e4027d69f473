//! Validation error types

use thiserror::Error;

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The first field a player failed on
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Player name must not be empty")]
    EmptyName,

    #[error("Country of player {name} must not be empty")]
    EmptyCountry { name: String },

    #[error("Weight {weight} of player {name} is outside [0, 400]")]
    WeightOutOfRange { name: String, weight: i32 },

    #[error("Height {height} of player {name} is outside [0, 400]")]
    HeightOutOfRange { name: String, height: f64 },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "name",
            ValidationError::EmptyCountry { .. } => "country",
            ValidationError::WeightOutOfRange { .. } => "weight",
            ValidationError::HeightOutOfRange { .. } => "height",
        }
    }
}
