//! DraftResult - the structured reply returned to the caller.

use serde::{Deserialize, Serialize};

/// A drafted reply, shaped by the channel it was drafted for.
///
/// Serializes without a tag, so an email renders as `{subject, body}` and a
/// direct message as `{message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DraftResult {
    Email { subject: String, body: String },
    DirectMessage { message: String },
}

impl DraftResult {
    pub fn email(subject: impl Into<String>, body: impl Into<String>) -> Self {
        DraftResult::Email {
            subject: subject.into(),
            body: body.into(),
        }
    }

    pub fn direct_message(message: impl Into<String>) -> Self {
        DraftResult::DirectMessage {
            message: message.into(),
        }
    }

    /// Subject line, present only for email drafts.
    pub fn subject(&self) -> Option<&str> {
        match self {
            DraftResult::Email { subject, .. } => Some(subject),
            DraftResult::DirectMessage { .. } => None,
        }
    }

    /// The reply text: the email body or the direct message.
    pub fn text(&self) -> &str {
        match self {
            DraftResult::Email { body, .. } => body,
            DraftResult::DirectMessage { message } => message,
        }
    }
}
