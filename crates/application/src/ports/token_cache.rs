//! Token cache port
//!
//! Lets tokens survive a restart so the kiosk does not log in again on every boot.

use async_trait::async_trait;

use kiosk_domain::TokenState;

/// Errors that can occur during token cache operations.
#[derive(Debug, thiserror::Error)]
pub enum TokenCacheError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Storage for the session's token state.
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Loads the cached tokens. Returns `None` if nothing is cached.
    async fn load(&self) -> Result<Option<TokenState>, TokenCacheError>;

    /// Replaces the cached tokens.
    async fn save(&self, state: &TokenState) -> Result<(), TokenCacheError>;

    /// Removes the cached tokens. Succeeds if nothing was cached.
    async fn clear(&self) -> Result<(), TokenCacheError>;
}
