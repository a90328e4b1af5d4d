//! HTTP adapter for the draft endpoint.

mod dto;
mod handlers;
mod routes;

pub use dto::{DraftReplyRequest, DraftReplyResponse};
pub use handlers::DraftHandlers;
pub use routes::draft_routes;
