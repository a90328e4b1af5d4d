//! Axum router configuration with middleware.
//!
//! Routes: `POST /api/draft`, `GET|PUT /api/settings`, `GET /health`.
//! Middleware: tracing, CORS, request timeout.

use axum::{routing::get, Json, Router};
use http::{header, HeaderValue, Method};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::draft::{draft_routes, DraftHandlers};
use super::settings::{settings_routes, SettingsHandlers};

/// Build the complete router with all routes and middleware.
pub fn build_router(
    draft: DraftHandlers,
    settings: SettingsHandlers,
    server: &ServerConfig,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(draft_routes(draft))
        .merge(settings_routes(settings))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Configured origins when given; otherwise permissive outside production
/// and same-origin only in production.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return if server.is_production() {
            CorsLayer::new()
        } else {
            CorsLayer::permissive()
        };
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE])
}
