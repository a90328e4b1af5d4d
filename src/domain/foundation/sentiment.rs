//! Sentiment of the incoming message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Perceived sentiment of the incoming message.
///
/// A negative sentiment makes the prompt instruct the model to stay calm
/// and non-aggressive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    #[default]
    Positive,
    Negative,
}

impl Sentiment {
    /// Returns true when the reply needs de-escalation.
    pub fn is_negative(&self) -> bool {
        matches!(self, Sentiment::Negative)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
        };
        write!(f, "{}", s)
    }
}
