//! Settings store configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Where saved drafting settings live
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("./.reply-drafter")
}
