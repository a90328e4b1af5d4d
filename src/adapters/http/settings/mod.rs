//! HTTP adapter for the settings endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::UpdateSettingsRequest;
pub use handlers::SettingsHandlers;
pub use routes::settings_routes;
