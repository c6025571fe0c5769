//! File-based token cache.
//!
//! Tokens are stored as plain JSON at a configured path:
//! ```json
//! {
//!   "access_token": "eyJ...",
//!   "refresh_token": "c2Vj...",
//!   "expires_at": "2024-05-01T10:15:00Z"
//! }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use kiosk_application::ports::{TokenCache, TokenCacheError};
use kiosk_domain::TokenState;

/// Token cache backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenCache {
    path: PathBuf,
}

impl FileTokenCache {
    /// Creates a cache that reads and writes `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The cache file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenCache for FileTokenCache {
    async fn load(&self) -> Result<Option<TokenState>, TokenCacheError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let state: TokenState = serde_json::from_slice(&content)
            .map_err(|e| TokenCacheError::Serialization(e.to_string()))?;
        Ok((!state.is_empty()).then_some(state))
    }

    async fn save(&self, state: &TokenState) -> Result<(), TokenCacheError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let mut json = serde_json::to_vec_pretty(state)
            .map_err(|e| TokenCacheError::Serialization(e.to_string()))?;
        json.push(b'\n');

        // Atomic replace.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenCacheError> {
        match fs::remove_file(&self.path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
