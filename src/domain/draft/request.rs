//! DraftRequest - a validated request for one drafted reply.

use crate::domain::foundation::{Channel, Sentiment, ValidationError};

use super::profile::{CompanyProfile, SenderIdentity, StylePreferences};

/// A validated request to draft a reply.
///
/// Construction enforces that `incoming` is non-blank. The configuration
/// snapshots are owned copies, so later edits by the caller cannot leak into
/// a draft in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRequest {
    channel: Channel,
    incoming: String,
    sender: SenderIdentity,
    company: CompanyProfile,
    style: StylePreferences,
    sentiment: Option<Sentiment>,
}

impl DraftRequest {
    /// Creates a request, rejecting a blank incoming message.
    pub fn new(channel: Channel, incoming: impl Into<String>) -> Result<Self, ValidationError> {
        let incoming = incoming.into();
        if incoming.trim().is_empty() {
            return Err(ValidationError::missing_field("incoming"));
        }

        Ok(Self {
            channel,
            incoming,
            sender: SenderIdentity::default(),
            company: CompanyProfile::default(),
            style: StylePreferences::default(),
            sentiment: None,
        })
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

    pub fn with_sentiment(mut self, sentiment: Option<Sentiment>) -> Self {
        self.sentiment = sentiment;
        self
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// The incoming message, verbatim.
    pub fn incoming(&self) -> &str {
        &self.incoming
    }

    pub fn sender(&self) -> &SenderIdentity {
        &self.sender
    }

    pub fn company(&self) -> &CompanyProfile {
        &self.company
    }

    pub fn style(&self) -> &StylePreferences {
        &self.style
    }

    pub fn sentiment(&self) -> Option<Sentiment> {
        self.sentiment
    }
}
