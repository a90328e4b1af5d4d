//! In-Memory Settings Store Adapter
//!
//! Keeps settings in memory. Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{SavedSettings, SettingsError, SettingsStore};

/// In-memory settings store
#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsStore {
    settings: Arc<RwLock<SavedSettings>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with `settings`
    pub fn with_settings(settings: SavedSettings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
        }
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load(&self) -> Result<SavedSettings, SettingsError> {
        Ok(self.settings.read().await.clone())
    }

    async fn save(&self, settings: &SavedSettings) -> Result<(), SettingsError> {
        *self.settings.write().await = settings.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::CompanyProfile;

    #[tokio::test]
    async fn save_replaces_settings() {
        let store = InMemorySettingsStore::new();
        assert_eq!(store.load().await.unwrap(), SavedSettings::default());

        let settings = SavedSettings {
            company: CompanyProfile::named("Acme"),
            ..Default::default()
        };
        store.save(&settings).await.unwrap();

        assert_eq!(store.load().await.unwrap(), settings);
    }
}
