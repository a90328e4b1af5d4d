//! Local Settings Store Adapter - Implementation of SettingsStore on disk.
//!
//! Each snapshot lives in its own JSON file:
//!
//! ```text
//! {dir}/
//! ├── company.json
//! ├── sender.json
//! └── style.json
//! ```
//!
//! Each write goes to its own `{name}.json.{uuid}.tmp` and is renamed into
//! place, so a crash mid-write never leaves a half-written file behind.
//! Saves on one store are serialized, so the three files always come from
//! the same save.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::ports::{SavedSettings, SettingsError, SettingsStore};

const COMPANY: &str = "company";
const SENDER: &str = "sender";
const STYLE: &str = "style";

/// Settings store backed by JSON files in one directory.
#[derive(Debug, Clone)]
pub struct LocalSettingsStore {
    dir: PathBuf,
    /// Held for a whole save; shared by clones.
    write_lock: Arc<Mutex<()>>,
}

impl LocalSettingsStore {
    /// Creates a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    fn temp_path(&self, name: &str) -> PathBuf {
        self.dir
            .join(format!("{}.json.{}.tmp", name, Uuid::new_v4().simple()))
    }

    /// Reads one entry. Missing and corrupt files yield the default.
    async fn read_entry<T>(&self, name: &str) -> Result<T, SettingsError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.entry_path(name);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => {
                return Err(SettingsError::io(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt settings file");
                Ok(T::default())
            }
        }
    }

    /// Writes one entry atomically. The temp file is removed if the write
    /// fails before the rename.
    async fn write_entry<T: Serialize>(&self, name: &str, value: &T) -> Result<(), SettingsError> {
        let json = serde_json::to_vec_pretty(value)
            .map_err(|e| SettingsError::serialization(e.to_string()))?;

        let temp_path = self.temp_path(name);
        let final_path = self.entry_path(name);

        let result = Self::write_and_rename(&temp_path, &final_path, &json).await;
        if result.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        }
        result
    }

    async fn write_and_rename(
        temp_path: &Path,
        final_path: &Path,
        json: &[u8],
    ) -> Result<(), SettingsError> {
        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            SettingsError::io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(json).await.map_err(|e| {
            SettingsError::io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            SettingsError::io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(temp_path, final_path).await.map_err(|e| {
            SettingsError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl SettingsStore for LocalSettingsStore {
    async fn load(&self) -> Result<SavedSettings, SettingsError> {
        Ok(SavedSettings {
            company: self.read_entry(COMPANY).await?,
            sender: self.read_entry(SENDER).await?,
            style: self.read_entry(STYLE).await?,
        })
    }

    async fn save(&self, settings: &SavedSettings) -> Result<(), SettingsError> {
        let _guard = self.write_lock.lock().await;

        fs::create_dir_all(&self.dir).await.map_err(|e| {
            SettingsError::io(format!(
                "Failed to create settings directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        self.write_entry(COMPANY, &settings.company).await?;
        self.write_entry(SENDER, &settings.sender).await?;
        self.write_entry(STYLE, &settings.style).await?;

        tracing::debug!(dir = %self.dir.display(), "Settings saved");
        Ok(())
    }
}
