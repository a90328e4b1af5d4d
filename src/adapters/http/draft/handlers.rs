//! HTTP handlers for the draft endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{draft_error_status, ErrorResponse};
use crate::application::handlers::draft::{DraftReplyError, DraftReplyHandler};
use crate::ports::{SavedSettings, SettingsStore};

use super::dto::{DraftReplyRequest, DraftReplyResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DraftHandlers {
    draft_handler: Arc<DraftReplyHandler>,
    settings_store: Arc<dyn SettingsStore>,
}

impl DraftHandlers {
    pub fn new(draft_handler: Arc<DraftReplyHandler>, settings_store: Arc<dyn SettingsStore>) -> Self {
        Self {
            draft_handler,
            settings_store,
        }
    }

    /// Saved settings, or defaults when the store cannot be read.
    async fn saved_settings(&self) -> SavedSettings {
        match self.settings_store.load().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to default settings");
                SavedSettings::default()
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/draft - Draft a reply to an incoming message
pub async fn draft_reply(
    State(handlers): State<DraftHandlers>,
    body: Result<Json<DraftReplyRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return ErrorResponse::validation(rejection.body_text())
                .into_response_with(StatusCode::BAD_REQUEST)
        }
    };

    let saved = if req.needs_saved_settings() {
        handlers.saved_settings().await
    } else {
        SavedSettings::default()
    };

    match handlers.draft_handler.handle(req.into_command(saved)).await {
        Ok(draft) => (StatusCode::OK, Json(DraftReplyResponse::from(draft))).into_response(),
        Err(e) => handle_draft_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_draft_error(error: DraftReplyError) -> Response {
    let status = draft_error_status(error.kind());
    ErrorResponse::from(&error).into_response_with(status)
}
