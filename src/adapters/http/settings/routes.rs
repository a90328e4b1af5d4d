//! HTTP routes for the settings endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_settings, update_settings, SettingsHandlers};

/// Creates the settings router.
pub fn settings_routes(handlers: SettingsHandlers) -> Router {
    Router::new()
        .route("/api/settings", get(get_settings).put(update_settings))
        .with_state(handlers)
}
