//! Mock Completion Client for testing.
//!
//! Provides a scripted implementation of the CompletionClient port, allowing
//! tests to run without calling the real endpoint.
//!
//! # Features
//!
//! - Scripted responses, consumed in order
//! - A fallback response once the script runs out
//! - Simulated latency
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let client = MockCompletionClient::new()
//!     .with_error(CompletionError::transport("timeout"))
//!     .with_response(r#"{"message":"Hi!"}"#);
//!
//! assert!(client.complete(request.clone()).await.is_err());
//! assert_eq!(client.complete(request).await?, r#"{"message":"Hi!"}"#);
//! assert_eq!(client.call_count(), 2);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{CompletionClient, CompletionError, CompletionRequest};

/// Returned once the script and fallback are both exhausted.
const DEFAULT_CONTENT: &str = "Mock response";

/// Mock completion client for testing.
#[derive(Debug, Clone)]
pub struct MockCompletionClient {
    /// Scripted responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Response used once the script is empty.
    fallback: Option<MockResponse>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    credentials: bool,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this completion text.
    Success(String),
    /// Return an error.
    Error(CompletionError),
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompletionClient {
    /// Creates a new mock client with credentials and an empty script.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            fallback: None,
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
            credentials: true,
        }
    }

    /// Adds a successful response to the script.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success(content.into()))
    }

    /// Adds an error response to the script.
    pub fn with_error(self, error: CompletionError) -> Self {
        self.push(MockResponse::Error(error))
    }

    /// Fails with `error` on every call not covered by the script.
    pub fn failing_with(mut self, error: CompletionError) -> Self {
        self.fallback = Some(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Reports the credential as missing.
    pub fn without_credentials(mut self) -> Self {
        self.credentials = false;
        self
    }

    /// Returns the number of calls made to this client.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    fn push(self, response: MockResponse) -> Self {
        lock(&self.responses).push_back(response);
        self
    }

    /// Gets the next scripted response, the fallback, or a default.
    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| MockResponse::Success(DEFAULT_CONTENT.to_string()))
    }
}

/// Locks shared mock state. A test that panicked while holding the lock
/// leaves the data intact, so the guard is recovered.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        // Record the call and claim a response before any delay, so
        // concurrent callers see the script in call order.
        lock(&self.calls).push(request);
        let response = self.next_response();

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match response {
            MockResponse::Success(content) => Ok(content),
            MockResponse::Error(err) => Err(err),
        }
    }

    fn has_credentials(&self) -> bool {
        self.credentials
    }
}
