//! OpenAI Completion Client - Implementation of CompletionClient for the
//! OpenAI chat-completions API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(Some(api_key))
//!     .with_base_url("https://api.openai.com/v1")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let client = OpenAICompletionClient::new(config)?;
//! ```
//!
//! Each `complete` call is exactly one POST. Retrying is left to the caller.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::ports::{CompletionClient, CompletionError, CompletionRequest, ResponseFormat};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the OpenAI client.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication. `None` leaves the client unusable but
    /// constructible, so the server can start without one.
    api_key: Option<Secret<String>>,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Creates a new configuration. A blank key counts as missing.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key
                .filter(|key| !key.trim().is_empty())
                .map(Secret::new),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }
}

/// OpenAI chat-completions client.
pub struct OpenAICompletionClient {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAICompletionClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to OpenAI's format.
    fn to_openai_request(request: &CompletionRequest) -> OpenAIRequest {
        OpenAIRequest {
            model: request.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: request.system_prompt.clone(),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: request.user_prompt.clone(),
                },
            ],
            temperature: request.temperature,
            response_format: OpenAIResponseFormat::from_format(&request.response_format),
        }
    }

    /// Sends a request.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, CompletionError> {
        let api_key = self
            .config
            .api_key()
            .ok_or_else(|| CompletionError::transport("no API key configured"))?;

        self.client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&Self::to_openai_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::transport(format!(
                        "request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    CompletionError::transport(format!("Connection failed: {}", e))
                } else {
                    CompletionError::transport(e.to_string())
                }
            })
    }

    /// Maps a non-2xx status to a transport error.
    async fn handle_response_status(response: Response) -> Result<Response, CompletionError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(CompletionError::status(status.as_u16(), error_body))
    }

    /// Extracts the first choice's text, trimmed.
    async fn parse_response(response: Response) -> Result<String, CompletionError> {
        let response = Self::handle_response_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::transport(format!("Failed to read response: {}", e)))?;

        openai_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(CompletionError::EmptyResponse)
    }
}

#[async_trait]
impl CompletionClient for OpenAICompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let response = self.send_request(&request).await?;
        Self::parse_response(response).await
    }

    fn has_credentials(&self) -> bool {
        self.config.has_api_key()
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<OpenAIResponseFormat>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OpenAIResponseFormat {
    JsonObject,
    JsonSchema { json_schema: OpenAIJsonSchema },
}

impl OpenAIResponseFormat {
    fn from_format(format: &ResponseFormat) -> Option<Self> {
        match format {
            ResponseFormat::Text => None,
            ResponseFormat::JsonObject => Some(OpenAIResponseFormat::JsonObject),
            ResponseFormat::JsonSchema(schema) => Some(OpenAIResponseFormat::JsonSchema {
                json_schema: OpenAIJsonSchema {
                    name: schema.name.to_string(),
                    schema: schema.schema.clone(),
                    strict: true,
                },
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct OpenAIJsonSchema {
    name: String,
    schema: Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::{
        build_prompt, CompanyProfile, ResponseSchema, SenderIdentity, StylePreferences,
    };
    use crate::domain::foundation::Channel;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    type Recorded = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    fn request(channel: Channel) -> CompletionRequest {
        let prompt = build_prompt(
            &CompanyProfile::default(),
            &SenderIdentity::default(),
            &StylePreferences::default(),
            channel,
            "Hello there",
            None,
        );
        CompletionRequest::from_prompt(&prompt, "gpt-4o-mini")
    }

    /// Serves `/chat/completions` with a fixed status and body, recording
    /// the authorization header and request body of every call.
    async fn spawn_endpoint(status: StatusCode, body: Value) -> (String, Recorded) {
        let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
        let seen = recorded.clone();

        let app = Router::new().route(
            "/chat/completions",
            post(move |headers: HeaderMap, Json(req): Json<Value>| {
                let seen = seen.clone();
                let body = body.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);
                    seen.lock().unwrap().push((auth, req));
                    (status, Json(body))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), recorded)
    }

    fn client(base_url: &str) -> OpenAICompletionClient {
        OpenAICompletionClient::new(
            OpenAIConfig::new(Some("test-key".to_string())).with_base_url(base_url),
        )
        .unwrap()
    }

    fn completion(content: Value) -> Value {
        json!({
            "model": "gpt-4o-mini",
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new(Some("test-key".to_string()))
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key(), Some("test-key"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        assert!(!OpenAIConfig::new(None).has_api_key());
        assert!(!OpenAIConfig::new(Some("  ".to_string())).has_api_key());

        let client = OpenAICompletionClient::new(OpenAIConfig::new(None)).unwrap();
        assert!(!client.has_credentials());
        assert_eq!(client.credential_name(), "OPENAI_API_KEY");
    }

    #[test]
    fn request_carries_both_prompts_and_json_object_format() {
        let req = request(Channel::Email);
        let body = serde_json::to_value(OpenAICompletionClient::to_openai_request(&req)).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], req.system_prompt.as_str());
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], req.user_prompt.as_str());
        assert_eq!(body["response_format"], json!({ "type": "json_object" }));
    }

    #[test]
    fn json_schema_format_is_strict() {
        let schema = ResponseSchema::for_channel(Channel::Instagram);
        let req = request(Channel::Instagram)
            .with_response_format(ResponseFormat::JsonSchema(schema.clone()));
        let body = serde_json::to_value(OpenAICompletionClient::to_openai_request(&req)).unwrap();

        assert_eq!(
            body["response_format"],
            json!({
                "type": "json_schema",
                "json_schema": { "name": "direct_message_reply", "schema": schema.schema, "strict": true }
            })
        );
    }

    #[test]
    fn text_format_omits_response_format() {
        let req = request(Channel::Email).with_response_format(ResponseFormat::Text);
        let body = serde_json::to_value(OpenAICompletionClient::to_openai_request(&req)).unwrap();
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let client = client("http://localhost:9999/v1/");
        assert_eq!(client.completions_url(), "http://localhost:9999/v1/chat/completions");
    }

    #[tokio::test]
    async fn returns_trimmed_first_choice() {
        let (url, recorded) =
            spawn_endpoint(StatusCode::OK, completion(json!("  {\"message\":\"Hi\"}\n"))).await;

        let text = client(&url).complete(request(Channel::Linkedin)).await.unwrap();

        assert_eq!(text, r#"{"message":"Hi"}"#);
        let calls = recorded.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.as_deref(), Some("Bearer test-key"));
        assert_eq!(calls[0].1["temperature"], json!(0.4));
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        let (url, _) = spawn_endpoint(
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "error": { "message": "overloaded" } }),
        )
        .await;

        let err = client(&url).complete(request(Channel::Email)).await.unwrap_err();

        match err {
            CompletionError::Transport(message) => {
                assert!(message.contains("503"));
                assert!(message.contains("overloaded"));
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn blank_content_is_empty_response() {
        let (url, _) = spawn_endpoint(StatusCode::OK, completion(json!("   "))).await;
        let err = client(&url).complete(request(Channel::Email)).await.unwrap_err();
        assert_eq!(err, CompletionError::EmptyResponse);
    }

    #[tokio::test]
    async fn null_content_is_empty_response() {
        let (url, _) = spawn_endpoint(StatusCode::OK, completion(Value::Null)).await;
        let err = client(&url).complete(request(Channel::Email)).await.unwrap_err();
        assert_eq!(err, CompletionError::EmptyResponse);
    }

    #[tokio::test]
    async fn missing_choices_is_empty_response() {
        let (url, _) = spawn_endpoint(StatusCode::OK, json!({ "choices": [] })).await;
        let err = client(&url).complete(request(Channel::Email)).await.unwrap_err();
        assert_eq!(err, CompletionError::EmptyResponse);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr))
            .complete(request(Channel::Email))
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::Transport(_)));
    }
}
