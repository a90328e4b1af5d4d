//! Completion endpoint configuration

use serde::Deserialize;
use std::time::Duration;

use crate::ports::{ResponseFormatMode, DEFAULT_TEMPERATURE};

use super::error::ValidationError;

/// Completion endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key. Optional: without it the server starts but rejects
    /// draft requests.
    pub openai_api_key: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the chat-completions API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Structured-output constraint sent with each call
    #[serde(default)]
    pub response_format: ResponseFormatMode,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate completion configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model.trim().is_empty() {
            return Err(ValidationError::EmptyModel);
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidAiTimeout);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
            response_format: ResponseFormatMode::default(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.response_format, ResponseFormatMode::JsonObject);
        assert!(!config.has_openai());
    }

    #[test]
    fn test_missing_key_is_valid() {
        assert!(AiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        let config = AiConfig {
            openai_api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!config.has_openai());
    }

    #[test]
    fn test_validation_temperature_range() {
        let config = AiConfig {
            temperature: 2.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));

        let config = AiConfig {
            temperature: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_base_url() {
        let config = AiConfig {
            base_url: "api.openai.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_validation_empty_model() {
        let config = AiConfig {
            model: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyModel));
    }
}
