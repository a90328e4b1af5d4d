//! Completion Client Adapters.
//!
//! Implementations of the CompletionClient port.
//!
//! ## Available Adapters
//!
//! - `OpenAICompletionClient` - OpenAI chat-completions API
//! - `MockCompletionClient` - Scripted mock for testing

mod mock_client;
mod openai_client;

pub use mock_client::{MockCompletionClient, MockResponse};
pub use openai_client::{OpenAICompletionClient, OpenAIConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
