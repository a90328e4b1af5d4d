//! Channel enum for the medium a reply is drafted for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ValidationError;

/// Target medium for a drafted reply.
///
/// The channel governs both the prompt framing and the output shape:
/// email drafts carry a subject and body, direct messages a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Email,
    Linkedin,
    Instagram,
}

impl Channel {
    /// Returns true for channels whose drafts have a subject line.
    pub fn is_email(&self) -> bool {
        matches!(self, Channel::Email)
    }

    /// Wire name used in requests and prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "EMAIL",
            Channel::Linkedin => "LINKEDIN",
            Channel::Instagram => "INSTAGRAM",
        }
    }

    /// Human framing used inside prompts ("Email" vs "DM").
    pub fn framing(&self) -> &'static str {
        match self {
            Channel::Email => "Email",
            Channel::Linkedin => "LinkedIn DM",
            Channel::Instagram => "Instagram DM",
        }
    }

    /// Keys the model must return for this channel.
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            Channel::Email => &["subject", "body"],
            Channel::Linkedin | Channel::Instagram => &["message"],
        }
    }
}

impl FromStr for Channel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EMAIL" => Ok(Channel::Email),
            "LINKEDIN" => Ok(Channel::Linkedin),
            "INSTAGRAM" => Ok(Channel::Instagram),
            _ => Err(ValidationError::invalid_channel(s)),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
