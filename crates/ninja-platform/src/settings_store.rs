//! Settings storage backends.
//!
//! The on-disk shape matches the extension's sync storage: a single JSON
//! object with the settings under the `settings` key. Other top-level keys
//! are left untouched on write.

use async_trait::async_trait;
use ninja_core::{error::NinjaError, settings::Settings, traits::SettingsStore};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Key the settings object lives under.
const SETTINGS_KEY: &str = "settings";

/// JSON-file-backed settings store.
pub struct JsonFileSettingsStore {
    path: PathBuf,
    /// Serialises read-modify-write of the whole file.
    lock: Mutex<()>,
}

impl JsonFileSettingsStore {
    /// Create a store, ensuring the parent directory exists.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, NinjaError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                NinjaError::Storage(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        info!("Settings store at {}", path.display());
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole-file object; a missing file reads as empty.
    async fn read_root(&self) -> Result<Map<String, Value>, NinjaError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(NinjaError::Storage(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(NinjaError::Storage(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn get(&self) -> Result<Settings, NinjaError> {
        let _guard = self.lock.lock().await;
        let mut root = self.read_root().await?;
        match root.remove(SETTINGS_KEY) {
            Some(Value::Null) | None => Ok(Settings::default()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    async fn set(&self, settings: &Settings) -> Result<(), NinjaError> {
        let _guard = self.lock.lock().await;
        let mut root = self.read_root().await?;
        root.insert(SETTINGS_KEY.to_string(), serde_json::to_value(settings)?);

        let body = serde_json::to_string_pretty(&Value::Object(root))?;
        tokio::fs::write(&self.path, body).await.map_err(|e| {
            NinjaError::Storage(format!("failed to write {}: {e}", self.path.display()))
        })?;
        debug!("settings saved to {}", self.path.display());
        Ok(())
    }
}

/// In-memory settings store for ephemeral sessions and tests.
#[derive(Default)]
pub struct MemorySettingsStore {
    settings: Mutex<Option<Settings>>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(Some(settings)),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self) -> Result<Settings, NinjaError> {
        Ok(self.settings.lock().await.clone().unwrap_or_default())
    }

    async fn set(&self, settings: &Settings) -> Result<(), NinjaError> {
        *self.settings.lock().await = Some(settings.clone());
        Ok(())
    }
}
