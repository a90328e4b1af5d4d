//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CompletionClient` - the chat-completion endpoint (one call per attempt)
//! - `SettingsStore` - persistence for company, sender and style snapshots

mod completion_client;
mod settings_store;

pub use completion_client::{
    CompletionClient, CompletionError, CompletionRequest, ResponseFormat, ResponseFormatMode,
    DEFAULT_TEMPERATURE,
};
pub use settings_store::{SavedSettings, SettingsError, SettingsStore};
