//! Draft handlers - retry orchestration and the draft controller.

mod draft_reply;
mod retry;

pub use draft_reply::{
    DraftReplyCommand, DraftReplyError, DraftReplyHandler, FailureKind, DEFAULT_MODEL,
};
pub use retry::{
    AttemptError, DraftFailed, DraftRetrier, RetryPolicy, DEFAULT_BASE_DELAY,
    DEFAULT_MAX_ATTEMPTS,
};
