//! HTTP DTOs for the draft endpoint.

use serde::{Deserialize, Serialize};

use crate::application::handlers::draft::DraftReplyCommand;
use crate::domain::draft::{CompanyProfile, DraftResult, SenderIdentity, StylePreferences};
use crate::domain::foundation::Sentiment;
use crate::ports::SavedSettings;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to draft a reply.
///
/// `channel` stays a raw string so an unknown value is reported by the
/// handler's validation rather than rejected during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftReplyRequest {
    pub channel: Option<String>,
    pub incoming: Option<String>,
    pub sender: Option<SenderIdentity>,
    pub company: Option<CompanyProfile>,
    pub style: Option<StylePreferences>,
    pub sentiment: Option<Sentiment>,
    /// Applies the "Shorten" preset to whichever style ends up in use.
    #[serde(default)]
    pub shorten: bool,
}

impl DraftReplyRequest {
    /// True when any snapshot must come from saved settings.
    pub fn needs_saved_settings(&self) -> bool {
        self.sender.is_none() || self.company.is_none() || self.style.is_none()
    }

    /// Builds the command, filling absent snapshots from `saved`.
    pub fn into_command(self, saved: SavedSettings) -> DraftReplyCommand {
        let style = self.style.unwrap_or(saved.style);
        DraftReplyCommand {
            channel: self.channel,
            incoming: self.incoming,
            sender: self.sender.unwrap_or(saved.sender),
            company: self.company.unwrap_or(saved.company),
            style: if self.shorten { style.shortened() } else { style },
            sentiment: self.sentiment,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Successful draft: `{ "ok": true, "data": {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftReplyResponse {
    pub ok: bool,
    pub data: DraftResult,
}

impl From<DraftResult> for DraftReplyResponse {
    fn from(data: DraftResult) -> Self {
        Self { ok: true, data }
    }
}
