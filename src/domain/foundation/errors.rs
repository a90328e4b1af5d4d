//! Error types for the domain layer.

use thiserror::Error;

/// Request validation failures.
///
/// Raised before any prompt construction or network activity and never
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid channel '{value}': expected EMAIL, LINKEDIN or INSTAGRAM")]
    InvalidChannel { value: String },

    #[error("Missing {name}")]
    MissingCredential { name: String },
}

impl ValidationError {
    /// Creates a missing field validation error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        ValidationError::MissingField { field: field.into() }
    }

    /// Creates an invalid channel validation error.
    pub fn invalid_channel(value: impl Into<String>) -> Self {
        ValidationError::InvalidChannel { value: value.into() }
    }

    /// Creates a missing credential validation error.
    pub fn missing_credential(name: impl Into<String>) -> Self {
        ValidationError::MissingCredential { name: name.into() }
    }

    /// Returns true when the failure is a missing credential rather than bad input.
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, ValidationError::MissingCredential { .. })
    }
}
