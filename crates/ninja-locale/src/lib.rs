//! # ninja-locale
//!
//! Localization for the popup: `messages.json` bundles, the sources they are
//! fetched from, and the per-session [`LocaleResolver`] that resolves a key
//! through current locale, fallback locale, native lookup, and finally the
//! key itself.

pub mod bundle;
pub mod detect;
pub mod native;
pub mod resolver;
pub mod source;

pub use bundle::{LocaleBundle, MessageEntry, Placeholder};
pub use detect::{detect_default_language, system_languages};
pub use native::{BundleMessages, NoNativeMessages};
pub use resolver::LocaleResolver;
pub use source::{FsBundleSource, HttpBundleSource};
