//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod draft;

pub use draft::{
    // Handler
    DraftReplyHandler,
    // Commands and errors
    DraftReplyCommand,
    DraftReplyError,
    FailureKind,
    // Retry
    AttemptError,
    DraftFailed,
    DraftRetrier,
    RetryPolicy,
};
