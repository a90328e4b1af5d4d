//! Completion Client Port - Interface for the chat-completion endpoint.
//!
//! One call to [`CompletionClient::complete`] is exactly one request to the
//! endpoint. Implementations never retry; the retry policy belongs to the
//! application layer so each attempt stays a single unit of work.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoClient;
//!
//! #[async_trait]
//! impl CompletionClient for EchoClient {
//!     async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
//!         Ok(request.user_prompt)
//!     }
//!
//!     fn has_credentials(&self) -> bool {
//!         true
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::draft::{PromptBundle, ResponseSchema};

/// Sampling temperature used for drafts. Low, to favor consistency.
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Port for the chat-completion endpoint.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends one completion request and returns the first choice's text,
    /// trimmed.
    ///
    /// # Errors
    ///
    /// - [`CompletionError::Transport`] on connection failure, timeout or a
    ///   non-2xx status.
    /// - [`CompletionError::EmptyResponse`] when the endpoint answers without
    ///   any completion text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;

    /// Returns false when the credential the endpoint needs is missing.
    fn has_credentials(&self) -> bool;

    /// Name of the credential reported when it is missing.
    fn credential_name(&self) -> &'static str {
        "OPENAI_API_KEY"
    }
}

/// How strongly the endpoint is asked for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormatMode {
    /// Send no response-format constraint.
    None,
    /// Ask for any JSON object.
    #[default]
    JsonObject,
    /// Ask for a JSON object matching the channel schema.
    JsonSchema,
}

/// Response-format constraint attached to a request.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    Text,
    JsonObject,
    JsonSchema(ResponseSchema),
}

impl ResponseFormat {
    /// Picks the constraint for `mode`, using `schema` when the mode needs it.
    pub fn for_mode(mode: ResponseFormatMode, schema: &ResponseSchema) -> Self {
        match mode {
            ResponseFormatMode::None => ResponseFormat::Text,
            ResponseFormatMode::JsonObject => ResponseFormat::JsonObject,
            ResponseFormatMode::JsonSchema => ResponseFormat::JsonSchema(schema.clone()),
        }
    }
}

/// Request for one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier (e.g. "gpt-4o-mini").
    pub model: String,
    /// System instruction.
    pub system_prompt: String,
    /// User instruction.
    pub user_prompt: String,
    pub temperature: f32,
    pub response_format: ResponseFormat,
}

impl CompletionRequest {
    /// Creates a request from a built prompt with default temperature and a
    /// JSON-object constraint.
    pub fn from_prompt(prompt: &PromptBundle, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: prompt.system.clone(),
            user_prompt: prompt.user.clone(),
            temperature: DEFAULT_TEMPERATURE,
            response_format: ResponseFormat::JsonObject,
        }
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the response-format constraint.
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }
}

/// Completion endpoint errors. Both variants are transient from the retry
/// policy's point of view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    /// Network failure, timeout or non-2xx status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint answered but produced no completion text.
    #[error("completion endpoint returned an empty response")]
    EmptyResponse,
}

impl CompletionError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a transport error for a non-2xx status.
    pub fn status(status: u16, body: impl AsRef<str>) -> Self {
        let body = body.as_ref().trim();
        if body.is_empty() {
            Self::Transport(format!("endpoint returned status {}", status))
        } else {
            Self::Transport(format!("endpoint returned status {}: {}", status, body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::{build_prompt, CompanyProfile, SenderIdentity, StylePreferences};
    use crate::domain::foundation::Channel;

    fn email_prompt() -> PromptBundle {
        build_prompt(
            &CompanyProfile::default(),
            &SenderIdentity::default(),
            &StylePreferences::default(),
            Channel::Email,
            "Hello",
            None,
        )
    }

    #[test]
    fn from_prompt_copies_prompts_and_defaults() {
        let prompt = email_prompt();
        let request = CompletionRequest::from_prompt(&prompt, "gpt-4o-mini");

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.system_prompt, prompt.system);
        assert_eq!(request.user_prompt, prompt.user);
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(request.response_format, ResponseFormat::JsonObject);
    }

    #[test]
    fn builder_overrides() {
        let request = CompletionRequest::from_prompt(&email_prompt(), "m")
            .with_temperature(0.1)
            .with_response_format(ResponseFormat::Text);
        assert_eq!(request.temperature, 0.1);
        assert_eq!(request.response_format, ResponseFormat::Text);
    }

    #[test]
    fn response_format_follows_mode() {
        let schema = ResponseSchema::for_channel(Channel::Linkedin);
        assert_eq!(
            ResponseFormat::for_mode(ResponseFormatMode::None, &schema),
            ResponseFormat::Text
        );
        assert_eq!(
            ResponseFormat::for_mode(ResponseFormatMode::JsonObject, &schema),
            ResponseFormat::JsonObject
        );
        assert_eq!(
            ResponseFormat::for_mode(ResponseFormatMode::JsonSchema, &schema),
            ResponseFormat::JsonSchema(schema.clone())
        );
    }

    #[test]
    fn response_format_mode_deserializes_snake_case() {
        let mode: ResponseFormatMode = serde_json::from_str("\"json_schema\"").unwrap();
        assert_eq!(mode, ResponseFormatMode::JsonSchema);
        assert_eq!(ResponseFormatMode::default(), ResponseFormatMode::JsonObject);
    }

    #[test]
    fn status_error_includes_body_when_present() {
        assert_eq!(
            CompletionError::status(503, "overloaded").to_string(),
            "transport error: endpoint returned status 503: overloaded"
        );
        assert_eq!(
            CompletionError::status(500, "  ").to_string(),
            "transport error: endpoint returned status 500"
        );
    }
}
