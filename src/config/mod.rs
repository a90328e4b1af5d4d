//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `REPLY_DRAFTER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use reply_drafter::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod drafting;
mod error;
mod server;
mod settings;

pub use ai::AiConfig;
pub use drafting::DraftingConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use settings::SettingsConfig;

use serde::Deserialize;
use std::env;

/// Plain variable read when `REPLY_DRAFTER__AI__OPENAI_API_KEY` is unset.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Plain variable read when `REPLY_DRAFTER__AI__MODEL` is unset.
pub const OPENAI_MODEL_VAR: &str = "OPENAI_MODEL";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Completion endpoint configuration (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Retry and fallback tuning
    #[serde(default)]
    pub drafting: DraftingConfig,

    /// Settings store location
    #[serde(default)]
    pub settings: SettingsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Seeds `ai.openai_api_key` and `ai.model` from `OPENAI_API_KEY` and
    ///    `OPENAI_MODEL` as lowest-priority defaults
    /// 3. Reads environment variables with `REPLY_DRAFTER` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `REPLY_DRAFTER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `REPLY_DRAFTER__DRAFTING__MAX_ATTEMPTS=3` -> `drafting.max_attempts = 3`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Ok(key) = env::var(OPENAI_API_KEY_VAR) {
            builder = builder.set_default("ai.openai_api_key", key)?;
        }
        if let Ok(model) = env::var(OPENAI_MODEL_VAR) {
            builder = builder.set_default("ai.model", model)?;
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("REPLY_DRAFTER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Beyond the per-section checks, the server's request deadline must
    /// cover a draft whose every attempt hits the completion timeout, so
    /// exhaustion reaches the caller as `draft_failed` instead of being cut
    /// off by the timeout layer.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.drafting.validate()?;

        let required = self.drafting.worst_case_cycle(self.ai.timeout());
        if self.server.request_timeout() < required {
            return Err(ValidationError::RequestTimeoutTooShort {
                timeout_secs: self.server.request_timeout_secs,
                required_secs: required.as_secs() + u64::from(required.subsec_nanos() > 0),
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
