//! Result parser for raw model completions.
//!
//! The completion endpoint is not guaranteed to honor structured-output
//! instructions, so two outcomes are designed in:
//!
//! - Text that parses as JSON must carry the channel's required keys as
//!   non-blank strings, otherwise the attempt is a [`ParseError::SchemaMismatch`]
//!   (retried upstream).
//! - Text that is not JSON at all degrades to a best-effort draft wrapping
//!   the raw text verbatim.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::foundation::Channel;

use super::result::DraftResult;

/// Subject used when an email completion is not JSON.
pub const DEFAULT_FALLBACK_SUBJECT: &str = "Re: Your message";

/// Errors raised while interpreting a completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{channel} response is missing required keys: {}", .missing.join(", "))]
    SchemaMismatch {
        channel: Channel,
        missing: Vec<String>,
    },
}

impl ParseError {
    pub fn schema_mismatch(channel: Channel, missing: Vec<String>) -> Self {
        ParseError::SchemaMismatch { channel, missing }
    }
}

/// Turns raw completion text into a [`DraftResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftParser {
    fallback_subject: String,
}

impl Default for DraftParser {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_SUBJECT)
    }
}

impl DraftParser {
    pub fn new(fallback_subject: impl Into<String>) -> Self {
        Self {
            fallback_subject: fallback_subject.into(),
        }
    }

    pub fn fallback_subject(&self) -> &str {
        &self.fallback_subject
    }

    /// Parses `raw` for `channel`.
    pub fn parse(&self, raw: &str, channel: Channel) -> Result<DraftResult, ParseError> {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => extract(value, channel),
            Err(_) => Ok(self.fallback(raw, channel)),
        }
    }

    /// Wraps non-JSON text into the channel's shape.
    pub fn fallback(&self, raw: &str, channel: Channel) -> DraftResult {
        if channel.is_email() {
            DraftResult::email(self.fallback_subject.clone(), raw)
        } else {
            DraftResult::direct_message(raw)
        }
    }
}

fn extract(value: Value, channel: Channel) -> Result<DraftResult, ParseError> {
    let empty = Map::new();
    let object = value.as_object().unwrap_or(&empty);

    let mut fields = Vec::with_capacity(channel.required_keys().len());
    let mut missing = Vec::new();
    for key in channel.required_keys() {
        match object.get(*key).and_then(Value::as_str) {
            Some(text) if !text.trim().is_empty() => fields.push(text.to_string()),
            _ => missing.push((*key).to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(ParseError::schema_mismatch(channel, missing));
    }

    let mut fields = fields.into_iter();
    match (fields.next(), fields.next()) {
        (Some(subject), Some(body)) if channel.is_email() => Ok(DraftResult::email(subject, body)),
        (Some(message), None) => Ok(DraftResult::direct_message(message)),
        _ => Err(ParseError::schema_mismatch(
            channel,
            channel.required_keys().iter().map(|k| k.to_string()).collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_email_json() {
        let draft = DraftParser::default()
            .parse(r#"{"subject":"Re: Pricing","body":"Hi Alex, ..."}"#, Channel::Email)
            .unwrap();
        assert_eq!(draft, DraftResult::email("Re: Pricing", "Hi Alex, ..."));
    }

    #[test]
    fn parses_direct_message_json() {
        let draft = DraftParser::default()
            .parse(r#"{"message":"Thanks for reaching out!"}"#, Channel::Linkedin)
            .unwrap();
        assert_eq!(draft, DraftResult::direct_message("Thanks for reaching out!"));
    }

    #[test]
    fn ignores_extra_keys() {
        let draft = DraftParser::default()
            .parse(
                r#"{"message":"Hey","subject":"unused","confidence":0.9}"#,
                Channel::Instagram,
            )
            .unwrap();
        assert_eq!(draft, DraftResult::direct_message("Hey"));
    }

    #[test]
    fn email_missing_body_is_schema_mismatch() {
        let err = DraftParser::default()
            .parse(r#"{"subject":"Hello"}"#, Channel::Email)
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::schema_mismatch(Channel::Email, vec!["body".to_string()])
        );
        assert_eq!(
            err.to_string(),
            "EMAIL response is missing required keys: body"
        );
    }

    #[test]
    fn direct_message_with_email_shape_is_schema_mismatch() {
        let err = DraftParser::default()
            .parse(r#"{"subject":"Hi","body":"There"}"#, Channel::Linkedin)
            .unwrap_err();
        assert!(matches!(err, ParseError::SchemaMismatch { .. }));
    }

    #[test]
    fn blank_or_non_string_values_are_schema_mismatch() {
        let parser = DraftParser::default();
        assert!(parser.parse(r#"{"message":"   "}"#, Channel::Instagram).is_err());
        assert!(parser.parse(r#"{"message":42}"#, Channel::Instagram).is_err());
        assert!(parser
            .parse(r#"{"subject":null,"body":"x"}"#, Channel::Email)
            .is_err());
    }

    #[test]
    fn json_that_is_not_an_object_is_schema_mismatch() {
        let err = DraftParser::default().parse("[1, 2]", Channel::Email).unwrap_err();
        assert_eq!(
            err,
            ParseError::schema_mismatch(
                Channel::Email,
                vec!["subject".to_string(), "body".to_string()]
            )
        );
    }

    #[test]
    fn non_json_email_falls_back_to_default_subject() {
        let raw = "Hi Alex, thanks for asking about pricing!";
        let draft = DraftParser::default().parse(raw, Channel::Email).unwrap();
        assert_eq!(draft, DraftResult::email("Re: Your message", raw));
    }

    #[test]
    fn non_json_direct_message_falls_back_to_message() {
        let raw = "Hey! Happy to chat.";
        for channel in [Channel::Linkedin, Channel::Instagram] {
            let draft = DraftParser::default().parse(raw, channel).unwrap();
            assert_eq!(draft, DraftResult::direct_message(raw));
        }
    }

    #[test]
    fn fenced_json_is_treated_as_text() {
        let raw = "```json\n{\"message\":\"Hi\"}\n```";
        let draft = DraftParser::default().parse(raw, Channel::Linkedin).unwrap();
        assert_eq!(draft, DraftResult::direct_message(raw));
    }

    #[test]
    fn fallback_subject_is_configurable() {
        let parser = DraftParser::new("Re: Your inquiry");
        let draft = parser.parse("plain text", Channel::Email).unwrap();
        assert_eq!(draft.subject(), Some("Re: Your inquiry"));
        assert_eq!(parser.fallback_subject(), "Re: Your inquiry");
    }

    proptest! {
        #[test]
        fn non_json_text_always_falls_back_verbatim(text in "[A-Za-z][A-Za-z ,.!?]{0,120}") {
            prop_assume!(serde_json::from_str::<Value>(&text).is_err());
            let parser = DraftParser::default();

            let email = parser.parse(&text, Channel::Email).unwrap();
            prop_assert_eq!(email, DraftResult::email(DEFAULT_FALLBACK_SUBJECT, text.clone()));

            let dm = parser.parse(&text, Channel::Instagram).unwrap();
            prop_assert_eq!(dm, DraftResult::direct_message(text));
        }
    }
}
