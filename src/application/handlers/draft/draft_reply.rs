//! DraftReplyHandler - validates a draft command and runs it through the
//! prompt builder and the retrier.
//!
//! Validation happens before any network activity: a missing credential,
//! blank incoming message or unknown channel never reaches the completion
//! endpoint.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::domain::draft::{
    CompanyProfile, DraftRequest, DraftResult, PromptBundle, SenderIdentity, StylePreferences,
};
use crate::domain::foundation::{Channel, Sentiment, ValidationError};
use crate::ports::CompletionClient;

use super::retry::{DraftFailed, DraftRetrier};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Command to draft one reply.
///
/// `channel` and `incoming` arrive unvalidated; the handler rejects a
/// missing or unknown channel and a blank message.
#[derive(Debug, Clone, Default)]
pub struct DraftReplyCommand {
    pub channel: Option<String>,
    pub incoming: Option<String>,
    pub sender: SenderIdentity,
    pub company: CompanyProfile,
    pub style: StylePreferences,
    pub sentiment: Option<Sentiment>,
}

impl DraftReplyCommand {
    pub fn new(channel: Channel, incoming: impl Into<String>) -> Self {
        Self {
            channel: Some(channel.as_str().to_string()),
            incoming: Some(incoming.into()),
            ..Default::default()
        }
    }

    pub fn with_sender(mut self, sender: SenderIdentity) -> Self {
        self.sender = sender;
        self
    }

    pub fn with_company(mut self, company: CompanyProfile) -> Self {
        self.company = company;
        self
    }

    pub fn with_style(mut self, style: StylePreferences) -> Self {
        self.style = style;
        self
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    fn into_request(self) -> Result<DraftRequest, ValidationError> {
        let incoming = self.incoming.unwrap_or_default();
        let channel = self
            .channel
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ValidationError::missing_field("channel"));

        // Blank incoming is reported ahead of a bad channel.
        if incoming.trim().is_empty() {
            return Err(ValidationError::missing_field("incoming"));
        }
        let channel: Channel = channel?.parse()?;

        Ok(DraftRequest::new(channel, incoming)?
            .with_sender(self.sender)
            .with_company(self.company)
            .with_style(self.style)
            .with_sentiment(self.sentiment))
    }
}

/// Coarse failure classification surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    MissingCredential,
    DraftFailed,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Validation => "validation",
            FailureKind::MissingCredential => "missing_credential",
            FailureKind::DraftFailed => "draft_failed",
        }
    }
}

/// Errors from [`DraftReplyHandler::handle`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftReplyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    DraftFailed(#[from] DraftFailed),
}

impl DraftReplyError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DraftReplyError::Validation(e) if e.is_missing_credential() => {
                FailureKind::MissingCredential
            }
            DraftReplyError::Validation(_) => FailureKind::Validation,
            DraftReplyError::DraftFailed(_) => FailureKind::DraftFailed,
        }
    }
}

/// Handler for drafting replies.
///
/// Stateless between calls; share it behind an `Arc` to serve concurrent
/// requests.
pub struct DraftReplyHandler {
    retrier: DraftRetrier,
    model: String,
}

impl DraftReplyHandler {
    pub fn new(retrier: DraftRetrier, model: impl Into<String>) -> Self {
        Self {
            retrier,
            model: model.into(),
        }
    }

    /// Creates a handler with the default retry policy and model.
    pub fn with_client(client: Arc<dyn CompletionClient>) -> Self {
        Self::new(DraftRetrier::new(client), DEFAULT_MODEL)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn handle(&self, cmd: DraftReplyCommand) -> Result<DraftResult, DraftReplyError> {
        let draft_id = Uuid::new_v4();
        let span = tracing::info_span!("draft_reply", %draft_id);

        self.draft(cmd).instrument(span).await
    }

    async fn draft(&self, cmd: DraftReplyCommand) -> Result<DraftResult, DraftReplyError> {
        // 1. Credential check
        let client = self.retrier.client();
        if !client.has_credentials() {
            let err = ValidationError::missing_credential(client.credential_name());
            tracing::warn!(error = %err, "Rejecting draft request");
            return Err(err.into());
        }

        // 2. Validate input
        let request = cmd.into_request().map_err(|err| {
            tracing::warn!(error = %err, "Rejecting draft request");
            err
        })?;

        // 3. Build prompt
        let prompt = PromptBundle::for_request(&request);
        tracing::debug!(
            channel = %prompt.channel,
            sentiment = ?request.sentiment(),
            user_prompt_len = prompt.user.len(),
            "Prompt built"
        );

        // 4. Draft with retry
        Ok(self.retrier.draft_with_retry(&prompt, &self.model).await?)
    }
}
