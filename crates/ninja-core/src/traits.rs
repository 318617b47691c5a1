use crate::{
    error::NinjaError,
    message::{Notification, TabId, TabMessage},
    settings::Settings,
};
use async_trait::async_trait;

/// Locale bundle storage.
///
/// Returns the raw `messages.json` body for a locale id. Not-found, transport
/// and status failures are all errors; the caller decides how to absorb them.
#[async_trait]
pub trait BundleSource: Send + Sync {
    /// Human-readable source name.
    fn name(&self) -> &str;

    /// Fetch `_locales/<locale>/messages.json`.
    async fn fetch(&self, locale: &str) -> Result<String, NinjaError>;
}

/// Platform-provided message lookup, consulted after the loaded bundles.
pub trait NativeMessages: Send + Sync {
    /// Localized text for `key`, or `None` when the platform has nothing.
    fn get_message(&self, key: &str, substitutions: &[&str]) -> Option<String>;
}

/// Key-value settings storage shared with the rest of the extension.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read the settings object. A missing object reads as defaults.
    async fn get(&self) -> Result<Settings, NinjaError>;

    /// Replace the settings object.
    async fn set(&self, settings: &Settings) -> Result<(), NinjaError>;
}

/// OAuth token cache of the identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Return a token if one is available. With `interactive`, the provider
    /// may prompt the user to sign in.
    async fn get_auth_token(&self, interactive: bool) -> Result<Option<String>, NinjaError>;

    /// Drop every cached token.
    async fn clear_all_cached_auth_tokens(&self) -> Result<(), NinjaError>;
}

/// Per-tab message dispatch.
#[async_trait]
pub trait TabMessenger: Send + Sync {
    /// Ids of every open tab.
    async fn tabs(&self) -> Result<Vec<TabId>, NinjaError>;

    /// Deliver a message to one tab. Fails when no receiver is listening.
    async fn send(&self, tab: TabId, message: &TabMessage) -> Result<(), NinjaError>;
}

/// Notification banner display.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}
