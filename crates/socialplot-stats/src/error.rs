//! Error types for socialplot-stats

use thiserror::Error;

/// Errors raised by the summary statistics engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Empty input, missing field, or an argument outside its valid range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A value that does not parse to a finite number
    #[error("Non-finite value for '{field}': {raw:?}")]
    NonFiniteValue { field: String, raw: String },
}

impl StatsError {
    /// Shorthand for an `InvalidInput` error
    pub fn invalid(message: impl Into<String>) -> Self {
        StatsError::InvalidInput(message.into())
    }

    /// Shorthand for a `NonFiniteValue` error
    pub fn non_finite(field: impl Into<String>, raw: impl Into<String>) -> Self {
        StatsError::NonFiniteValue {
            field: field.into(),
            raw: raw.into(),
        }
    }

    /// Check if this is an `InvalidInput` error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, StatsError::InvalidInput(_))
    }

    /// Check if this is a `NonFiniteValue` error
    pub fn is_non_finite(&self) -> bool {
        matches!(self, StatsError::NonFiniteValue { .. })
    }
}

/// Result type alias for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;
