//! Foundation module - Shared domain primitives.
//!
//! Contains the enums and error types that form the vocabulary of the
//! reply drafting domain.

mod channel;
mod errors;
mod sentiment;

pub use channel::Channel;
pub use errors::ValidationError;
pub use sentiment::Sentiment;
