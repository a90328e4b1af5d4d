//! HTTP adapters - REST API implementations.
//!
//! Each endpoint group has its own module; `router` assembles them.

pub mod draft;
pub mod error;
pub mod settings;
mod router;

// Re-export key types for convenience
pub use draft::{draft_routes, DraftHandlers};
pub use error::ErrorResponse;
pub use router::build_router;
pub use settings::{settings_routes, SettingsHandlers};
