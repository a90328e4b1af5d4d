//! HTTP listener configuration
//!
//! The request deadline here is applied to every route, including
//! `POST /api/draft`. A draft that keeps failing runs through every
//! completion attempt and every backoff wait before it can report
//! `draft_failed`, so the deadline is checked against the drafting and
//! completion sections in [`super::AppConfig::validate`].

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// IP address to bind to (IPv4 or IPv6 literal)
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Selects CORS strictness and the log format
    #[serde(default)]
    pub environment: Environment,

    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whole-request deadline in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Allowed browser origins, comma-separated
    pub cors_origins: Option<String>,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Permissive CORS and human-readable logs
    #[default]
    Development,
    /// Same-origin CORS unless origins are listed, JSON logs
    Production,
}

impl ServerConfig {
    /// Address the listener binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        self.host
            .trim()
            .parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.port))
            .map_err(|_| ValidationError::InvalidBindAddress(self.host.clone()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Configured origins, trimmed, blanks dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Checks the listener settings on their own. The deadline's lower bound
    /// depends on other sections and is checked by `AppConfig::validate`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr()?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,reply_drafter=debug".to_string()
}

/// Five attempts at the 60 s completion timeout plus 15 s of backoff is
/// 315 s; the default leaves headroom above that.
fn default_request_timeout() -> u64 {
    360
}
