//! HTTP handlers for the settings endpoints.

use std::sync::Arc;

use tokio::sync::Mutex;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::ports::{SettingsError, SettingsStore};

use super::dto::UpdateSettingsRequest;

#[derive(Clone)]
pub struct SettingsHandlers {
    store: Arc<dyn SettingsStore>,
    /// Serializes read-merge-write so concurrent partial updates both land.
    update_lock: Arc<Mutex<()>>,
}

impl SettingsHandlers {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self {
            store,
            update_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// GET /api/settings - Current saved settings
pub async fn get_settings(State(handlers): State<SettingsHandlers>) -> Response {
    match handlers.store.load().await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => handle_settings_error(e),
    }
}

/// PUT /api/settings - Save any subset of company, sender and style
pub async fn update_settings(
    State(handlers): State<SettingsHandlers>,
    body: Result<Json<UpdateSettingsRequest>, JsonRejection>,
) -> Response {
    let Json(update) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return ErrorResponse::validation(rejection.body_text())
                .into_response_with(StatusCode::BAD_REQUEST)
        }
    };

    let _guard = handlers.update_lock.lock().await;
    let current = match handlers.store.load().await {
        Ok(settings) => settings,
        Err(e) => return handle_settings_error(e),
    };
    let settings = update.apply(current);

    match handlers.store.save(&settings).await {
        Ok(()) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => handle_settings_error(e),
    }
}

fn handle_settings_error(error: SettingsError) -> Response {
    tracing::error!(error = %error, "Settings store failure");
    ErrorResponse::internal(error.to_string()).into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}
