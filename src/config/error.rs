//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Request timeout must be at least 1 second")]
    InvalidTimeout,

    #[error(
        "Request timeout of {timeout_secs}s cannot cover a full draft retry cycle \
         (needs at least {required_secs}s)"
    )]
    RequestTimeoutTooShort { timeout_secs: u64, required_secs: u64 },

    #[error("Invalid completion timeout")]
    InvalidAiTimeout,

    #[error("Invalid completion base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Model name must not be empty")]
    EmptyModel,

    #[error("Temperature must be within 0.0..=2.0")]
    InvalidTemperature,

    #[error("max_attempts must be at least 1")]
    InvalidMaxAttempts,

    #[error("Fallback subject must not be empty")]
    EmptyFallbackSubject,
}
