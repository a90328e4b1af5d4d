//! Draft module - reply drafting domain.
//!
//! Holds the configuration snapshots a draft is built from, the validated
//! request, the prompt builder and the result parser. Nothing here performs
//! I/O; the completion call and retry policy live in the application layer.

mod parser;
mod profile;
mod prompt;
mod request;
mod result;

pub use parser::{DraftParser, ParseError, DEFAULT_FALLBACK_SUBJECT};
pub use profile::{CompanyProfile, SenderIdentity, StylePreferences, SHORTENED_MAX_WORDS};
pub use prompt::{
    build_prompt, system_prompt, user_prompt, PromptBundle, ResponseSchema, DEFAULT_COMPANY_NAME,
    DEFAULT_CTA, DEFAULT_LANGUAGE, DEFAULT_LINKS, DEFAULT_MAX_WORDS, DEFAULT_MISSION,
    DEFAULT_PRODUCT, DEFAULT_SENDER_NAME, DEFAULT_TONE, DEFAULT_VALUE_PROPS,
};
pub use request::DraftRequest;
pub use result::DraftResult;
