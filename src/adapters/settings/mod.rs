//! Settings Store Adapters.
//!
//! - `LocalSettingsStore` - JSON files in a local directory
//! - `InMemorySettingsStore` - For tests and development

mod in_memory;
mod local;

pub use in_memory::InMemorySettingsStore;
pub use local::LocalSettingsStore;
