//! Error body shared by all endpoints: `{ "error": ..., "kind": ... }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::handlers::draft::{DraftReplyError, FailureKind};

/// Standard error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

impl ErrorResponse {
    pub fn new(kind: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind: kind.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Validation.as_str(), message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal", message)
    }

    /// Renders with `status`.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl From<&DraftReplyError> for ErrorResponse {
    fn from(err: &DraftReplyError) -> Self {
        Self::new(err.kind().as_str(), err.to_string())
    }
}

/// Status for a draft failure: caller mistakes are 400, an exhausted
/// upstream is 502.
pub fn draft_error_status(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::Validation | FailureKind::MissingCredential => StatusCode::BAD_REQUEST,
        FailureKind::DraftFailed => StatusCode::BAD_GATEWAY,
    }
}
