//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    // Draft handlers
    DraftReplyCommand, DraftReplyError, DraftReplyHandler, FailureKind,
    DraftFailed, DraftRetrier, RetryPolicy,
};
