mod defaults;
mod locale;

#[cfg(test)]
mod tests;

pub use locale::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::NinjaError;
use defaults::*;

/// Top-level Schedule Ninja configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ninja: NinjaConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub popup: PopupConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NinjaConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for NinjaConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Settings storage config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the `{"settings": {...}}` object.
    /// Empty = `{data_dir}/settings.json`.
    #[serde(default)]
    pub settings_path: String,
}

/// Identity provider config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Cached token file. Empty = `{data_dir}/token`.
    #[serde(default)]
    pub token_path: String,
    /// Environment variable consulted for interactive sign-in.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_path: String::new(),
            token_env: default_token_env(),
        }
    }
}

/// Popup behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupConfig {
    /// Delay before switching sections after sign-in or disconnect.
    #[serde(default = "default_transition_delay_ms")]
    pub transition_delay_ms: u64,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            transition_delay_ms: default_transition_delay_ms(),
        }
    }
}

impl Config {
    /// Resolved settings file path.
    pub fn settings_path(&self) -> String {
        if self.storage.settings_path.is_empty() {
            format!("{}/settings.json", shellexpand(&self.ninja.data_dir))
        } else {
            shellexpand(&self.storage.settings_path)
        }
    }

    /// Resolved token cache path.
    pub fn token_path(&self) -> String {
        if self.auth.token_path.is_empty() {
            format!("{}/token", shellexpand(&self.ninja.data_dir))
        } else {
            shellexpand(&self.auth.token_path)
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, NinjaError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| NinjaError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| NinjaError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
