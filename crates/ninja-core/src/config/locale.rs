use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Where locale bundles are fetched from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleSourceKind {
    /// `{locales_dir}/_locales/<id>/messages.json` on disk.
    #[default]
    Fs,
    /// `{base_url}/_locales/<id>/messages.json` over HTTP.
    Http,
}

/// Locale resolution config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    #[serde(default)]
    pub source: BundleSourceKind,
    /// Directory containing `_locales/`.
    #[serde(default = "default_locales_dir")]
    pub locales_dir: String,
    /// Base URL containing `_locales/` (http source only).
    #[serde(default)]
    pub base_url: String,
    /// Locale that is always loaded first and used when the preferred one fails.
    #[serde(default = "default_fallback_locale")]
    pub fallback: String,
    /// Bundle used for native message lookup. Empty = none.
    #[serde(default)]
    pub native_default: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            source: BundleSourceKind::default(),
            locales_dir: default_locales_dir(),
            base_url: String::new(),
            fallback: default_fallback_locale(),
            native_default: String::new(),
        }
    }
}
