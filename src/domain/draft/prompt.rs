//! Prompt builder for reply drafting.
//!
//! Turns the caller's configuration snapshots and the incoming message into a
//! system instruction, a user instruction and a channel-specific response
//! schema. Pure and deterministic: identical inputs produce byte-identical
//! prompts.

use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::foundation::{Channel, Sentiment};

use super::profile::{non_blank, CompanyProfile, SenderIdentity, StylePreferences};
use super::request::DraftRequest;

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_COMPANY_NAME: &str = "Seamless Source";
pub const DEFAULT_MISSION: &str =
    "Help fashion brands and suppliers collaborate transparently and sustainably.";
pub const DEFAULT_PRODUCT: &str =
    "Digital Product Passport (DPP) platform with BOM and traceability";
pub const DEFAULT_VALUE_PROPS: &str = "Compliance-ready DPPs, real-time LCA insights, supplier collaboration, easier audits, better consumer trust.";
pub const DEFAULT_LINKS: &str = "https://example.com";

pub const DEFAULT_SENDER_NAME: &str = "the sender";

pub const DEFAULT_TONE: &str = "polite, professional, caring, persuasive";
pub const DEFAULT_MAX_WORDS: u32 = 180;
pub const DEFAULT_LANGUAGE: &str = "English";
pub const DEFAULT_CTA: &str = "Book a 20-minute demo";

// ============================================================================
// Output
// ============================================================================

/// Shape hint sent to the completion endpoint.
///
/// Only biases the model toward structured output. Responses are validated by
/// the result parser, not against this schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSchema {
    /// Schema name, unique per output shape.
    pub name: &'static str,
    /// JSON Schema for the expected object.
    pub schema: Value,
}

impl ResponseSchema {
    /// Returns the schema for a channel's output shape.
    pub fn for_channel(channel: Channel) -> Self {
        if channel.is_email() {
            Self {
                name: "email_reply",
                schema: json!({
                    "type": "object",
                    "properties": {
                        "subject": { "type": "string" },
                        "body": { "type": "string" }
                    },
                    "required": ["subject", "body"],
                    "additionalProperties": false
                }),
            }
        } else {
            Self {
                name: "direct_message_reply",
                schema: json!({
                    "type": "object",
                    "properties": {
                        "message": { "type": "string" }
                    },
                    "required": ["message"],
                    "additionalProperties": false
                }),
            }
        }
    }
}

/// Everything needed to ask the model for one draft.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptBundle {
    pub channel: Channel,
    pub system: String,
    pub user: String,
    pub schema: ResponseSchema,
}

impl PromptBundle {
    /// Builds the prompt for a validated request.
    pub fn for_request(request: &DraftRequest) -> Self {
        build_prompt(
            request.company(),
            request.sender(),
            request.style(),
            request.channel(),
            request.incoming(),
            request.sentiment(),
        )
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builds the system and user prompts plus the response schema.
pub fn build_prompt(
    company: &CompanyProfile,
    sender: &SenderIdentity,
    style: &StylePreferences,
    channel: Channel,
    incoming: &str,
    sentiment: Option<Sentiment>,
) -> PromptBundle {
    PromptBundle {
        channel,
        system: system_prompt(company, channel),
        user: user_prompt(sender, style, channel, incoming, sentiment),
        schema: ResponseSchema::for_channel(channel),
    }
}

/// Builds the system instruction: voice, company context, writing rules and
/// output contract.
pub fn system_prompt(company: &CompanyProfile, channel: Channel) -> String {
    let name = non_blank(&company.name).unwrap_or(DEFAULT_COMPANY_NAME);
    let mission = non_blank(&company.mission).unwrap_or(DEFAULT_MISSION);
    let product = non_blank(&company.product).unwrap_or(DEFAULT_PRODUCT);
    let value_props = non_blank(&company.value_props).unwrap_or(DEFAULT_VALUE_PROPS);
    let links = non_blank(&company.links).unwrap_or(DEFAULT_LINKS);

    format!(
        "You are an assistant writing on behalf of the {name} team. \
         Always write in the first person plural (\"we\").\n\
         Goal: draft polite, professional and caring replies that encourage the recipient \
         to try or buy our product.\n\
         \n\
         Company context:\n\
         - Company name: {name}\n\
         - Mission: {mission}\n\
         - Core product: {product}\n\
         - Key value props: {value_props}\n\
         - Links: {links}\n\
         \n\
         {WRITING_RULES}\n\
         \n\
         Output format:\n\
         - Channel: {channel}\n\
         - {contract}\n\
         - Do NOT include markdown code fences.",
        contract = output_contract(channel),
    )
}

/// Builds the user instruction: incoming message, sender identity and style
/// directives, ending with the strict JSON instruction.
pub fn user_prompt(
    sender: &SenderIdentity,
    style: &StylePreferences,
    channel: Channel,
    incoming: &str,
    sentiment: Option<Sentiment>,
) -> String {
    let tone = non_blank(&style.tone).unwrap_or(DEFAULT_TONE);
    let max_words = style
        .max_words
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MAX_WORDS);
    let language = non_blank(&style.language).unwrap_or(DEFAULT_LANGUAGE);
    let cta = non_blank(&style.cta).unwrap_or(DEFAULT_CTA);

    let mut prompt = format!(
        "Incoming {framing} from {identity}:\n\
         ---\n\
         {incoming}\n\
         ---\n\
         \n\
         Please draft a reply to this {framing} that:\n\
         - Tone: {tone}.\n\
         - Max words: {max_words}.\n\
         - Language: {language}.\n\
         - Target CTA: {cta}.\n",
        framing = channel.framing(),
        identity = identity_line(sender),
    );

    if sentiment.is_some_and(|s| s.is_negative()) {
        prompt.push_str(NEGATIVE_SENTIMENT_RULE);
        prompt.push('\n');
    }

    prompt.push_str(&format!(
        "Return ONLY strict JSON matching {}, with no other text.",
        json_shape(channel)
    ));
    prompt
}

/// "Alex (Head of Sourcing at Acme, Germany)", or just the name when no
/// details are known.
fn identity_line(sender: &SenderIdentity) -> String {
    let name = non_blank(&sender.name).unwrap_or(DEFAULT_SENDER_NAME);

    let mut details = String::new();
    if let Some(role) = non_blank(&sender.role) {
        details.push_str(role);
    }
    if let Some(company) = non_blank(&sender.company) {
        if !details.is_empty() {
            details.push(' ');
        }
        details.push_str("at ");
        details.push_str(company);
    }
    if let Some(country) = non_blank(&sender.country) {
        if !details.is_empty() {
            details.push_str(", ");
        }
        details.push_str(country);
    }

    if details.is_empty() {
        name.to_string()
    } else {
        format!("{name} ({details})")
    }
}

fn output_contract(channel: Channel) -> String {
    if channel.is_email() {
        "Return a JSON object with keys { subject, body }.".to_string()
    } else {
        "Return a JSON object with the single key { message }.".to_string()
    }
}

fn json_shape(channel: Channel) -> &'static str {
    if channel.is_email() {
        r#"{"subject": string, "body": string}"#
    } else {
        r#"{"message": string}"#
    }
}

// ============================================================================
// Fixed text
// ============================================================================

const WRITING_RULES: &str = r#"Writing rules:
- Be human, concise, and kind. Avoid jargon.
- Mirror the sender's intent and answer their questions first.
- Gently steer toward our benefits and a clear call to action.
- If they asked for something we can't do, offer the closest helpful option.
- For Email: include a clear subject and sign off with our team name.
- For LinkedIn/Instagram DMs: be shorter, casual-professional, no subject.
- Localize currency and time zones only if that data is provided."#;

const NEGATIVE_SENTIMENT_RULE: &str = "- The sender is unhappy: stay calm, empathetic and non-aggressive. Acknowledge their concern before anything else and never argue or assign blame.";
