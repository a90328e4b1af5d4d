//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - Completion clients (OpenAI, mock)
//! - `settings` - Settings stores (local files, in-memory)
//! - `http` - REST API (axum)

pub mod ai;
pub mod http;
pub mod settings;

pub use ai::{MockCompletionClient, OpenAICompletionClient, OpenAIConfig};
pub use settings::{InMemorySettingsStore, LocalSettingsStore};
