//! Bundle sources: where `_locales/<id>/messages.json` comes from.

use async_trait::async_trait;
use ninja_core::{error::NinjaError, traits::BundleSource};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Longest accepted locale id (BCP 47 practical limit).
const MAX_LOCALE_ID_LEN: usize = 35;

/// Reject ids that could escape the `_locales` directory or URL path.
pub fn validate_locale_id(locale: &str) -> Result<(), NinjaError> {
    let valid = !locale.is_empty()
        && locale.len() <= MAX_LOCALE_ID_LEN
        && locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(NinjaError::Locale(format!("invalid locale id: {locale:?}")))
    }
}

/// Relative location of a locale's bundle.
pub fn bundle_path(locale: &str) -> String {
    format!("_locales/{locale}/messages.json")
}

/// Reads bundles from an unpacked extension directory.
pub struct FsBundleSource {
    root: PathBuf,
}

impl FsBundleSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn file_for(&self, locale: &str) -> PathBuf {
        self.root
            .join("_locales")
            .join(locale)
            .join("messages.json")
    }
}

#[async_trait]
impl BundleSource for FsBundleSource {
    fn name(&self) -> &str {
        "fs"
    }

    async fn fetch(&self, locale: &str) -> Result<String, NinjaError> {
        validate_locale_id(locale)?;
        let path = self.file_for(locale);
        debug!("reading bundle {}", path.display());
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| NinjaError::Locale(format!("failed to read {}: {e}", path.display())))
    }
}

/// Fetches bundles over HTTP from a hosted copy of the extension.
pub struct HttpBundleSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBundleSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Use a preconfigured client (proxies, timeouts, TLS roots).
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Full URL of a locale's bundle.
    pub fn url_for(&self, locale: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            bundle_path(locale)
        )
    }
}

#[async_trait]
impl BundleSource for HttpBundleSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, locale: &str) -> Result<String, NinjaError> {
        validate_locale_id(locale)?;
        let url = self.url_for(locale);
        debug!("fetching bundle {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| NinjaError::Locale(format!("request to {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NinjaError::Locale(format!(
                "failed to load locale {locale}: HTTP {status}"
            )));
        }

        resp.text()
            .await
            .map_err(|e| NinjaError::Locale(format!("failed to read body of {url}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::LocaleResolver;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `_locales/<id>/messages.json` for the given bundles; anything else is 404.
    /// Returns the base URL.
    async fn serve_bundles(bundles: &'static [(&'static str, &'static str)]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }
                    let request = String::from_utf8_lossy(&request);
                    let path = request.split_whitespace().nth(1).unwrap_or_default();

                    let body = bundles
                        .iter()
                        .find(|(locale, _)| path == format!("/{}", bundle_path(locale)))
                        .map(|(_, body)| *body);
                    let response = match body {
                        Some(body) => format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                            body.len()
                        ),
                        None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\
                                 Connection: close\r\n\r\n"
                            .to_string(),
                    };
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{addr}")
    }

    fn local_http_source(base_url: String) -> HttpBundleSource {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpBundleSource::with_client(base_url, client)
    }

    const HTTP_BUNDLES: &[(&str, &str)] =
        &[("en", r#"{"popupTitle": {"message": "Schedule Ninja"}}"#)];

    #[tokio::test]
    async fn test_http_source_fetches_bundle() {
        let src = local_http_source(serve_bundles(HTTP_BUNDLES).await);
        let body = src.fetch("en").await.unwrap();
        assert!(body.contains("Schedule Ninja"));
    }

    #[tokio::test]
    async fn test_http_source_not_found_is_locale_error() {
        let src = local_http_source(serve_bundles(HTTP_BUNDLES).await);
        let err = src.fetch("fr").await.unwrap_err();
        assert!(matches!(err, NinjaError::Locale(ref msg) if msg.contains("404")));
    }

    #[tokio::test]
    async fn test_http_404_locale_falls_back_in_resolver() {
        let src = local_http_source(serve_bundles(HTTP_BUNDLES).await);
        let resolver = LocaleResolver::new(Arc::new(src), "en");

        assert_eq!(resolver.initialize_locale("fr").await, "en");
        assert_eq!(resolver.t("popupTitle"), "Schedule Ninja");
        assert!(resolver.was_attempted("fr"));
        assert!(!resolver.is_loaded("fr"));
    }

    #[test]
    fn test_validate_locale_id() {
        assert!(validate_locale_id("en").is_ok());
        assert!(validate_locale_id("zh_CN").is_ok());
        assert!(validate_locale_id("pt-BR").is_ok());
        assert!(validate_locale_id("").is_err());
        assert!(validate_locale_id("../secrets").is_err());
        assert!(validate_locale_id("en/../../etc").is_err());
        assert!(validate_locale_id(&"x".repeat(36)).is_err());
    }

    #[test]
    fn test_http_url_for() {
        let src = HttpBundleSource::new("https://cdn.example.com/ext/");
        assert_eq!(
            src.url_for("ko"),
            "https://cdn.example.com/ext/_locales/ko/messages.json"
        );
    }

    #[tokio::test]
    async fn test_fs_source_reads_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let locale_dir = dir.path().join("_locales").join("ko");
        std::fs::create_dir_all(&locale_dir).unwrap();
        std::fs::write(
            locale_dir.join("messages.json"),
            r#"{"toggleOn": {"message": "켜짐"}}"#,
        )
        .unwrap();

        let src = FsBundleSource::new(dir.path());
        let body = src.fetch("ko").await.unwrap();
        assert!(body.contains("켜짐"));
    }

    #[tokio::test]
    async fn test_fs_source_missing_locale_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = FsBundleSource::new(dir.path());
        let err = src.fetch("fr").await.unwrap_err();
        assert!(matches!(err, NinjaError::Locale(_)));
    }

    #[tokio::test]
    async fn test_fs_source_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let src = FsBundleSource::new(dir.path());
        assert!(src.fetch("../..").await.is_err());
    }
}
