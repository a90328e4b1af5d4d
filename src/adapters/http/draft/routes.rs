//! HTTP routes for the draft endpoint.

use axum::{routing::post, Router};

use super::handlers::{draft_reply, DraftHandlers};

/// Creates the draft router.
pub fn draft_routes(handlers: DraftHandlers) -> Router {
    Router::new()
        .route("/api/draft", post(draft_reply))
        .with_state(handlers)
}
