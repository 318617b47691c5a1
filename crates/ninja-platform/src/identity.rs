//! File-backed OAuth token cache.

use async_trait::async_trait;
use ninja_core::{error::NinjaError, traits::IdentityProvider};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Caches a single token in a file.
///
/// Interactive sign-in takes the token from an environment variable (set by
/// whatever performed the OAuth flow) and caches it; non-interactive calls only
/// consult the cache.
pub struct FileTokenCache {
    path: PathBuf,
    token_env: String,
}

impl FileTokenCache {
    pub fn new(path: impl AsRef<Path>, token_env: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            token_env: token_env.into(),
        }
    }

    async fn read_cached(&self) -> Result<Option<String>, NinjaError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(token) => {
                let token = token.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NinjaError::Identity(format!(
                "failed to read token cache {}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn cache(&self, token: &str) -> Result<(), NinjaError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, token).await.map_err(|e| {
            NinjaError::Identity(format!(
                "failed to write token cache {}: {e}",
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl IdentityProvider for FileTokenCache {
    async fn get_auth_token(&self, interactive: bool) -> Result<Option<String>, NinjaError> {
        if let Some(token) = self.read_cached().await? {
            return Ok(Some(token));
        }
        if !interactive {
            return Ok(None);
        }

        match std::env::var(&self.token_env) {
            Ok(token) if !token.trim().is_empty() => {
                let token = token.trim().to_string();
                self.cache(&token).await?;
                info!("signed in, token cached at {}", self.path.display());
                Ok(Some(token))
            }
            _ => {
                warn!("interactive sign-in found no token in ${}", self.token_env);
                Ok(None)
            }
        }
    }

    async fn clear_all_cached_auth_tokens(&self) -> Result<(), NinjaError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("cleared cached token");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(NinjaError::Identity(format!(
                "failed to clear token cache {}: {e}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_non_interactive_reads_cache_only() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileTokenCache::new(dir.path().join("token"), "__NINJA_TEST_UNSET_VAR__");
        assert_eq!(cache.get_auth_token(false).await.unwrap(), None);

        std::fs::write(dir.path().join("token"), "abc123\n").unwrap();
        assert_eq!(
            cache.get_auth_token(false).await.unwrap().as_deref(),
            Some("abc123")
        );
    }

    #[tokio::test]
    async fn test_interactive_caches_env_token() {
        let dir = tempfile::tempdir().unwrap();
        let var = "__NINJA_TEST_TOKEN_INTERACTIVE__";
        std::env::set_var(var, "from-env");
        let cache = FileTokenCache::new(dir.path().join("auth/token"), var);

        assert_eq!(
            cache.get_auth_token(true).await.unwrap().as_deref(),
            Some("from-env")
        );
        std::env::remove_var(var);
        assert_eq!(
            cache.get_auth_token(false).await.unwrap().as_deref(),
            Some("from-env")
        );
    }

    #[tokio::test]
    async fn test_interactive_without_env_token_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileTokenCache::new(dir.path().join("token"), "__NINJA_TEST_UNSET_VAR__");
        assert_eq!(cache.get_auth_token(true).await.unwrap(), None);
        assert!(!dir.path().join("token").exists());
    }

    #[tokio::test]
    async fn test_clear_removes_token_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "abc").unwrap();
        let cache = FileTokenCache::new(&path, "__NINJA_TEST_UNSET_VAR__");

        cache.clear_all_cached_auth_tokens().await.unwrap();
        assert!(!path.exists());
        cache.clear_all_cached_auth_tokens().await.unwrap();
        assert_eq!(cache.get_auth_token(false).await.unwrap(), None);
    }
}
