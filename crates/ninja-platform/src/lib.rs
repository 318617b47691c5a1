//! # ninja-platform
//!
//! Host-side implementations of the services the popup talks to: settings
//! storage, the identity token cache, per-tab messaging, and notifications.

pub mod identity;
pub mod notify;
pub mod settings_store;
pub mod tabs;

pub use identity::FileTokenCache;
pub use notify::ConsoleNotifier;
pub use settings_store::{JsonFileSettingsStore, MemorySettingsStore};
pub use tabs::TabRegistry;
