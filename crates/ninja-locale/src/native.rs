//! Native message lookup, the third tier of resolution.

use ninja_core::{error::NinjaError, traits::BundleSource, traits::NativeMessages};

use crate::bundle::LocaleBundle;

/// Native lookup backed by the extension's default-locale bundle, as the
/// browser's own `getMessage` is.
pub struct BundleMessages {
    bundle: LocaleBundle,
}

impl BundleMessages {
    pub fn new(bundle: LocaleBundle) -> Self {
        Self { bundle }
    }

    /// Load the default-locale bundle from a source. Unlike resolver loads,
    /// failure here is reported to the caller.
    pub async fn load(source: &dyn BundleSource, locale: &str) -> Result<Self, NinjaError> {
        let body = source.fetch(locale).await?;
        Ok(Self::new(LocaleBundle::parse(&body)?))
    }
}

impl NativeMessages for BundleMessages {
    fn get_message(&self, key: &str, substitutions: &[&str]) -> Option<String> {
        self.bundle
            .message(key, substitutions)
            .filter(|m| !m.is_empty())
    }
}

/// No platform lookup available.
pub struct NoNativeMessages;

impl NativeMessages for NoNativeMessages {
    fn get_message(&self, _key: &str, _substitutions: &[&str]) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_messages_lookup() {
        let bundle = LocaleBundle::parse(
            r#"{"authFailure": {"message": "Sign-in failed: $1"}, "blank": {"message": ""}}"#,
        )
        .unwrap();
        let native = BundleMessages::new(bundle);
        assert_eq!(
            native.get_message("authFailure", &["timeout"]).as_deref(),
            Some("Sign-in failed: timeout")
        );
        assert_eq!(native.get_message("blank", &[]), None);
        assert_eq!(native.get_message("missing", &[]), None);
    }

    #[test]
    fn test_no_native_messages() {
        assert_eq!(NoNativeMessages.get_message("popupTitle", &[]), None);
    }
}
