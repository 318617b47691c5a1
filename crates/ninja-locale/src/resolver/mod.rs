//! Per-session locale resolver.
//!
//! Holds the bundle cache and the current locale for one popup session.
//! Lookups walk current locale → fallback locale → native messages → key.


use ninja_core::traits::{BundleSource, NativeMessages};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::bundle::LocaleBundle;

/// Cached outcome of a load: `None` marks a failed attempt.
type CacheEntry = Option<Arc<LocaleBundle>>;

/// Resolves message keys to display text for one popup session.
pub struct LocaleResolver {
    source: Arc<dyn BundleSource>,
    native: Option<Arc<dyn NativeMessages>>,
    fallback: String,
    /// Never locked across an `.await`; each cell serialises its own load.
    cache: Mutex<HashMap<String, Arc<OnceCell<CacheEntry>>>>,
    current: RwLock<Option<String>>,
}

impl LocaleResolver {
    pub fn new(source: Arc<dyn BundleSource>, fallback: impl Into<String>) -> Self {
        Self {
            source,
            native: None,
            fallback: fallback.into(),
            cache: Mutex::new(HashMap::new()),
            current: RwLock::new(None),
        }
    }

    /// Attach a platform lookup used when no loaded bundle has a key.
    pub fn with_native(mut self, native: Arc<dyn NativeMessages>) -> Self {
        self.native = Some(native);
        self
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback
    }

    /// The active locale, once [`initialize_locale`](Self::initialize_locale) ran.
    pub fn current_locale(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether `locale` has a successfully loaded bundle.
    pub fn is_loaded(&self, locale: &str) -> bool {
        self.cached(locale).is_some()
    }

    /// Whether a load of `locale` has completed, successfully or not.
    pub fn was_attempted(&self, locale: &str) -> bool {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(locale)
            .is_some_and(|cell| cell.initialized())
    }

    /// Load a locale's bundle, at most once per session.
    ///
    /// Failures are logged and cached as `None`; they never reach the caller.
    /// Concurrent calls for the same id share one fetch.
    pub async fn load_locale(&self, locale: &str) -> Option<Arc<LocaleBundle>> {
        let cell = {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            cache.entry(locale.to_string()).or_default().clone()
        };
        // Bound so the future borrowing `cell` is dropped before `cell` itself.
        let entry = cell.get_or_init(|| self.fetch_bundle(locale)).await.clone();
        entry
    }

    async fn fetch_bundle(&self, locale: &str) -> CacheEntry {
        let body = match self.source.fetch(locale).await {
            Ok(body) => body,
            Err(e) => {
                warn!("locale {locale} unavailable from {}: {e}", self.source.name());
                return None;
            }
        };
        match LocaleBundle::parse(&body) {
            Ok(bundle) => {
                info!("loaded locale {locale} ({} messages)", bundle.len());
                Some(Arc::new(bundle))
            }
            Err(e) => {
                warn!("locale {locale} has a malformed bundle: {e}");
                None
            }
        }
    }

    /// Load the fallback, then the preferred locale, then pick the current one.
    ///
    /// The preferred locale wins only when its bundle loaded and is non-empty.
    /// Returns the chosen locale. Safe to call again after a language change.
    pub async fn initialize_locale(&self, preferred: &str) -> String {
        if self.load_locale(&self.fallback).await.is_none() {
            warn!("fallback locale {} failed to load", self.fallback);
        }

        let chosen = match self.load_locale(preferred).await {
            Some(bundle) if !bundle.is_empty() => preferred.to_string(),
            _ => {
                if preferred != self.fallback {
                    debug!("preferred locale {preferred} unusable, using {}", self.fallback);
                }
                self.fallback.clone()
            }
        };

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(chosen.clone());
        chosen
    }

    /// Resolve `key` to display text. Never fails: the key itself is the last resort.
    pub fn resolve_message(&self, key: &str, substitutions: &[&str]) -> String {
        if let Some(current) = self.current_locale() {
            if let Some(text) = self
                .cached(&current)
                .and_then(|bundle| bundle.message(key, substitutions))
            {
                return text;
            }
        }

        if let Some(text) = self
            .cached(&self.fallback)
            .and_then(|bundle| bundle.message(key, substitutions))
        {
            return text;
        }

        if let Some(text) = self
            .native
            .as_ref()
            .and_then(|native| native.get_message(key, substitutions))
            .filter(|text| !text.is_empty())
        {
            return text;
        }

        key.to_string()
    }

    /// Shorthand for [`resolve_message`](Self::resolve_message) without substitutions.
    pub fn t(&self, key: &str) -> String {
        self.resolve_message(key, &[])
    }

    fn cached(&self, locale: &str) -> CacheEntry {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(locale)
            .and_then(|cell| cell.get().cloned())
            .flatten()
    }
}
