//! Configuration snapshots supplied by the caller for a single draft.
//!
//! Every field is optional. Missing or blank values are filled in by the
//! prompt builder, never by the caller, so these types carry no defaults of
//! their own.

use serde::{Deserialize, Serialize};

/// Word limit applied by the "Shorten" preset.
pub const SHORTENED_MAX_WORDS: u32 = 100;

/// The company the reply is written on behalf of.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyProfile {
    pub name: Option<String>,
    pub mission: Option<String>,
    pub product: Option<String>,
    /// Comma-delimited list of value propositions.
    pub value_props: Option<String>,
    pub links: Option<String>,
}

impl CompanyProfile {
    /// Creates a profile with only the company name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Who sent the incoming message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SenderIdentity {
    pub name: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub country: Option<String>,
}

impl SenderIdentity {
    /// Creates an identity with only the sender's name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Tone and format directives for the reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePreferences {
    pub tone: Option<String>,
    /// Upper bound on reply length. Zero is treated as unset.
    pub max_words: Option<u32>,
    pub language: Option<String>,
    pub cta: Option<String>,
}

impl StylePreferences {
    /// Returns a copy with the word limit cut to [`SHORTENED_MAX_WORDS`].
    pub fn shortened(&self) -> Self {
        Self {
            max_words: Some(SHORTENED_MAX_WORDS),
            ..self.clone()
        }
    }
}

/// Returns the trimmed value, or `None` when it is missing or blank.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
