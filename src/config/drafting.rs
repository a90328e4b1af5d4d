//! Drafting configuration: retry bound, backoff base and fallback subject

use serde::Deserialize;
use std::time::Duration;

use crate::application::handlers::draft::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS};
use crate::domain::draft::DEFAULT_FALLBACK_SUBJECT;

use super::error::ValidationError;

/// Drafting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DraftingConfig {
    /// Completion attempts per draft, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff base in milliseconds; the wait after attempt n is base * 2^n
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Email subject used when the model answers in plain text
    #[serde(default = "default_fallback_subject")]
    pub fallback_subject: String,
}

impl DraftingConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, self.base_delay())
    }

    /// Longest a failing draft can run when every attempt takes
    /// `per_attempt`: all attempts plus every backoff wait between them.
    pub fn worst_case_cycle(&self, per_attempt: Duration) -> Duration {
        let policy = self.retry_policy();
        per_attempt
            .saturating_mul(policy.max_attempts())
            .saturating_add(policy.total_backoff())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 {
            return Err(ValidationError::InvalidMaxAttempts);
        }
        if self.fallback_subject.trim().is_empty() {
            return Err(ValidationError::EmptyFallbackSubject);
        }
        Ok(())
    }
}

impl Default for DraftingConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            fallback_subject: default_fallback_subject(),
        }
    }
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_base_delay_ms() -> u64 {
    DEFAULT_BASE_DELAY.as_millis() as u64
}

fn default_fallback_subject() -> String {
    DEFAULT_FALLBACK_SUBJECT.to_string()
}
