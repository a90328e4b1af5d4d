//! Settings Store Port - persistence for the caller's drafting configuration.
//!
//! The drafting core never touches this store. It exists for the boundary
//! layer, which resolves saved company, sender and style snapshots before
//! handing a request to the core.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::draft::{CompanyProfile, SenderIdentity, StylePreferences};

/// The three saved configuration snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedSettings {
    pub company: CompanyProfile,
    pub sender: SenderIdentity,
    pub style: StylePreferences,
}

/// Errors that can occur during settings persistence.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to serialize settings: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl SettingsError {
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationFailed(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }
}

/// Port for loading and saving drafting settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Loads saved settings.
    ///
    /// Missing or corrupt entries come back as their defaults rather than as
    /// errors.
    async fn load(&self) -> Result<SavedSettings, SettingsError>;

    /// Replaces the saved settings.
    async fn save(&self, settings: &SavedSettings) -> Result<(), SettingsError>;
}
