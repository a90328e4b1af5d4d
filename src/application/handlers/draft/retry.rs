//! DraftRetrier - bounded retry with exponential backoff around one draft.
//!
//! Each attempt is one completion call followed by one parse. Any failure of
//! either step is transient: the retrier waits `base_delay * 2^n` after
//! failed attempt `n` (0-indexed) and tries again, until `max_attempts` calls
//! have been made. The first successful parse ends the loop.
//!
//! ```text
//! ATTEMPT(n) ──ok──────────────────────────────▶ SUCCESS
//!     │
//!     └─err─▶ n+1 < max ? WAIT(base·2ⁿ) ─▶ ATTEMPT(n+1)
//!                       : EXHAUSTED ─▶ DraftFailed
//! ```

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;

use crate::domain::draft::{DraftParser, DraftResult, ParseError, PromptBundle};
use crate::ports::{
    CompletionClient, CompletionError, CompletionRequest, ResponseFormat, ResponseFormatMode,
    DEFAULT_TEMPERATURE,
};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Attempt bound and backoff base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_BASE_DELAY)
    }
}

impl RetryPolicy {
    /// Creates a policy. At least one attempt is always made.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Wait after failed attempt `attempt` (0-indexed): `base_delay * 2^attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Total suspension when every attempt fails.
    pub fn total_backoff(&self) -> Duration {
        (0..self.max_attempts - 1)
            .map(|attempt| self.delay_after(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

/// Failure of a single attempt. Every variant is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Terminal failure after the attempt bound was reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Draft failed after {attempts} attempts: {last_error}")]
pub struct DraftFailed {
    /// Number of attempts made.
    pub attempts: u32,
    /// Cause of the final attempt's failure.
    pub last_error: AttemptError,
}

/// Runs completion + parse attempts under a [`RetryPolicy`].
///
/// Holds no per-request state, so one retrier can serve concurrent drafts.
pub struct DraftRetrier {
    client: Arc<dyn CompletionClient>,
    parser: DraftParser,
    policy: RetryPolicy,
    temperature: f32,
    response_format: ResponseFormatMode,
}

impl DraftRetrier {
    /// Creates a retrier with the default policy, parser and sampling settings.
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            parser: DraftParser::default(),
            policy: RetryPolicy::default(),
            temperature: DEFAULT_TEMPERATURE,
            response_format: ResponseFormatMode::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_parser(mut self, parser: DraftParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_response_format(mut self, mode: ResponseFormatMode) -> Self {
        self.response_format = mode;
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn client(&self) -> &Arc<dyn CompletionClient> {
        &self.client
    }

    /// Drafts a reply for `prompt` using `model`, retrying transient failures.
    pub async fn draft_with_retry(
        &self,
        prompt: &PromptBundle,
        model: &str,
    ) -> Result<DraftResult, DraftFailed> {
        let request = CompletionRequest::from_prompt(prompt, model)
            .with_temperature(self.temperature)
            .with_response_format(ResponseFormat::for_mode(self.response_format, &prompt.schema));

        let mut attempt = 0;
        loop {
            tracing::debug!(attempt = attempt + 1, channel = %prompt.channel, "Requesting draft");

            match self.attempt(request.clone(), prompt).await {
                Ok(draft) => {
                    tracing::info!(attempts = attempt + 1, channel = %prompt.channel, "Draft ready");
                    return Ok(draft);
                }
                Err(err) => {
                    let attempts = attempt + 1;
                    if attempts >= self.policy.max_attempts() {
                        tracing::error!(attempts, error = %err, "Draft attempts exhausted");
                        return Err(DraftFailed {
                            attempts,
                            last_error: err,
                        });
                    }

                    let delay = self.policy.delay_after(attempt);
                    tracing::warn!(
                        attempt = attempts,
                        max_attempts = self.policy.max_attempts(),
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Draft attempt failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt(
        &self,
        request: CompletionRequest,
        prompt: &PromptBundle,
    ) -> Result<DraftResult, AttemptError> {
        let raw = self.client.complete(request).await?;
        Ok(self.parser.parse(&raw, prompt.channel)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionClient;
    use crate::domain::draft::{build_prompt, CompanyProfile, SenderIdentity, StylePreferences};
    use crate::domain::foundation::Channel;
    use tokio::time::Instant;

    const EMAIL_JSON: &str = r#"{"subject":"Re: Pricing","body":"Hi Alex, ..."}"#;

    fn prompt(channel: Channel) -> PromptBundle {
        build_prompt(
            &CompanyProfile::named("Acme"),
            &SenderIdentity::named("Alex"),
            &StylePreferences::default(),
            channel,
            "Can you tell me your pricing?",
            None,
        )
    }

    #[test]
    fn delays_double_from_base() {
        let policy = RetryPolicy::default();
        let delays: Vec<u64> = (0..5)
            .map(|n| policy.delay_after(n).as_millis() as u64)
            .collect();
        assert_eq!(delays, vec![1000, 2000, 4000, 8000, 16000]);
    }

    #[test]
    fn total_backoff_counts_gaps_between_attempts() {
        assert_eq!(RetryPolicy::default().total_backoff(), Duration::from_millis(15_000));
        assert_eq!(
            RetryPolicy::new(1, Duration::from_secs(1)).total_backoff(),
            Duration::ZERO
        );
    }

    #[test]
    fn policy_always_allows_one_attempt() {
        assert_eq!(RetryPolicy::new(0, DEFAULT_BASE_DELAY).max_attempts(), 1);
    }

    #[test]
    fn delay_saturates_instead_of_overflowing() {
        let policy = RetryPolicy::new(100, Duration::from_secs(1));
        assert!(policy.delay_after(64) >= policy.delay_after(31));
    }

    #[tokio::test(start_paused = true)]
    async fn always_failing_client_exhausts_attempts() {
        let client = Arc::new(
            MockCompletionClient::new()
                .failing_with(CompletionError::transport("connection refused")),
        );
        let retrier = DraftRetrier::new(client.clone());

        let start = Instant::now();
        let err = retrier
            .draft_with_retry(&prompt(Channel::Email), "gpt-4o-mini")
            .await
            .unwrap_err();

        assert_eq!(client.call_count(), 5);
        assert_eq!(err.attempts, 5);
        assert_eq!(
            err.last_error,
            AttemptError::Completion(CompletionError::transport("connection refused"))
        );
        assert_eq!(start.elapsed(), Duration::from_millis(1000 * (1 + 2 + 4 + 8)));
    }

    #[tokio::test(start_paused = true)]
    async fn stops_at_first_success() {
        let client = Arc::new(
            MockCompletionClient::new()
                .with_error(CompletionError::transport("timeout"))
                .with_error(CompletionError::status(503, "overloaded"))
                .with_response(EMAIL_JSON)
                .with_response(r#"{"subject":"never","body":"used"}"#),
        );
        let retrier = DraftRetrier::new(client.clone());

        let start = Instant::now();
        let draft = retrier
            .draft_with_retry(&prompt(Channel::Email), "gpt-4o-mini")
            .await
            .unwrap();

        assert_eq!(client.call_count(), 3);
        assert_eq!(draft, DraftResult::email("Re: Pricing", "Hi Alex, ..."));
        assert_eq!(start.elapsed(), Duration::from_millis(1000 + 2000));
    }

    #[tokio::test(start_paused = true)]
    async fn first_attempt_success_does_not_wait() {
        let client = Arc::new(MockCompletionClient::new().with_response(r#"{"message":"Hey!"}"#));
        let retrier = DraftRetrier::new(client.clone());

        let start = Instant::now();
        let draft = retrier
            .draft_with_retry(&prompt(Channel::Linkedin), "gpt-4o-mini")
            .await
            .unwrap();

        assert_eq!(draft, DraftResult::direct_message("Hey!"));
        assert_eq!(client.call_count(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn schema_mismatch_and_empty_response_are_retried() {
        let client = Arc::new(
            MockCompletionClient::new()
                .with_response(r#"{"subject":"missing body"}"#)
                .with_error(CompletionError::EmptyResponse)
                .with_response(EMAIL_JSON),
        );
        let retrier = DraftRetrier::new(client.clone());

        let draft = retrier
            .draft_with_retry(&prompt(Channel::Email), "gpt-4o-mini")
            .await
            .unwrap();

        assert_eq!(client.call_count(), 3);
        assert_eq!(draft.subject(), Some("Re: Pricing"));
    }

    #[tokio::test(start_paused = true)]
    async fn non_json_text_is_not_retried() {
        let client = Arc::new(MockCompletionClient::new().with_response("Hi Alex, happy to help."));
        let retrier = DraftRetrier::new(client.clone());

        let draft = retrier
            .draft_with_retry(&prompt(Channel::Email), "gpt-4o-mini")
            .await
            .unwrap();

        assert_eq!(client.call_count(), 1);
        assert_eq!(draft, DraftResult::email("Re: Your message", "Hi Alex, happy to help."));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_carries_last_error_only() {
        let client = Arc::new(
            MockCompletionClient::new()
                .with_error(CompletionError::transport("first"))
                .with_response(r#"{"message":""}"#),
        );
        let retrier = DraftRetrier::new(client.clone())
            .with_policy(RetryPolicy::new(2, Duration::from_millis(10)));

        let err = retrier
            .draft_with_retry(&prompt(Channel::Instagram), "gpt-4o-mini")
            .await
            .unwrap_err();

        assert_eq!(err.attempts, 2);
        assert!(matches!(err.last_error, AttemptError::Parse(_)));
        assert!(!err.to_string().contains("first"));
    }

    #[tokio::test(start_paused = true)]
    async fn custom_policy_scales_backoff() {
        let client = Arc::new(MockCompletionClient::new().failing_with(CompletionError::EmptyResponse));
        let policy = RetryPolicy::new(3, Duration::from_millis(250));
        let retrier = DraftRetrier::new(client.clone()).with_policy(policy);

        let start = Instant::now();
        retrier
            .draft_with_retry(&prompt(Channel::Email), "gpt-4o-mini")
            .await
            .unwrap_err();

        assert_eq!(client.call_count(), 3);
        assert_eq!(start.elapsed(), policy.total_backoff());
        assert_eq!(start.elapsed(), Duration::from_millis(250 + 500));
    }

    #[tokio::test]
    async fn sends_prompt_model_and_sampling_settings() {
        let client = Arc::new(MockCompletionClient::new().with_response(EMAIL_JSON));
        let retrier = DraftRetrier::new(client.clone())
            .with_temperature(0.2)
            .with_response_format(ResponseFormatMode::JsonSchema);
        let prompt = prompt(Channel::Email);

        retrier.draft_with_retry(&prompt, "gpt-4o").await.unwrap();

        let calls = client.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "gpt-4o");
        assert_eq!(calls[0].system_prompt, prompt.system);
        assert_eq!(calls[0].user_prompt, prompt.user);
        assert_eq!(calls[0].temperature, 0.2);
        assert_eq!(
            calls[0].response_format,
            ResponseFormat::JsonSchema(prompt.schema.clone())
        );
    }

    #[tokio::test]
    async fn custom_fallback_subject_is_used() {
        let client = Arc::new(MockCompletionClient::new().with_response("plain reply"));
        let retrier =
            DraftRetrier::new(client).with_parser(DraftParser::new("Re: Your inquiry"));

        let draft = retrier
            .draft_with_retry(&prompt(Channel::Email), "gpt-4o-mini")
            .await
            .unwrap();

        assert_eq!(draft.subject(), Some("Re: Your inquiry"));
    }
}
