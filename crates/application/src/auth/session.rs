//! The authenticated session of the kiosk.
//!
//! `AuthSession` owns the credentials and the token store and is the only
//! component that mutates tokens. Every operation takes the store lock for
//! its whole duration, so at most one authenticate or refresh is in flight.
//!
//! Lifecycle:
//!
//! ```text
//! Unauthenticated --authenticate--> Authenticated
//! Authenticated --(expiring or 401)--> Refreshing --ok--> Authenticated
//! Refreshing --failed--> Unauthenticated --authenticate--> Authenticated
//! ```

use std::sync::Arc;

use chrono::TimeDelta;
use tracing::{debug, info, warn};

use kiosk_domain::{Credentials, TokenState};

use super::token_store::{TokenStatus, TokenStore};
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{Clock, ConfigurationApi, TokenCache};

/// Token lifecycle manager for one set of credentials.
pub struct AuthSession<A, C> {
    api: Arc<A>,
    clock: Arc<C>,
    credentials: Credentials,
    store: TokenStore,
    cache: Option<Arc<dyn TokenCache>>,
}

impl<A: ConfigurationApi, C: Clock> AuthSession<A, C> {
    /// Creates an unauthenticated session with the default leeway.
    pub fn new(api: Arc<A>, clock: Arc<C>, credentials: Credentials) -> Self {
        Self {
            api,
            clock,
            credentials,
            store: TokenStore::new(),
            cache: None,
        }
    }

    /// Sets the proactive refresh window.
    #[must_use]
    pub fn with_leeway(mut self, leeway: TimeDelta) -> Self {
        self.store = TokenStore::with_leeway(leeway);
        self
    }

    /// Persists tokens through the given cache.
    #[must_use]
    pub fn with_token_cache(mut self, cache: Arc<dyn TokenCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The underlying token store.
    #[must_use]
    pub const fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Current token status.
    pub async fn status(&self) -> TokenStatus {
        self.store.status(self.clock.now()).await
    }

    /// Returns true if an access token is held, usable or not.
    pub async fn has_token(&self) -> bool {
        self.store.lock().await.has_access_token()
    }

    /// Seeds an empty session from the token cache.
    ///
    /// Returns true if the session holds an access token afterwards.
    /// Cache failures are logged and treated as an empty cache.
    pub async fn restore(&self) -> bool {
        let mut state = self.store.lock().await;
        if state.is_empty()
            && let Some(cache) = &self.cache
        {
            match cache.load().await {
                Ok(Some(cached)) => {
                    info!(expires_at = ?cached.expires_at, "restored cached tokens");
                    *state = cached;
                }
                Ok(None) => debug!("token cache is empty"),
                Err(e) => warn!(error = %e, "failed to load token cache"),
            }
        }
        state.has_access_token()
    }

    /// Authenticates with the stored credentials and replaces all tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Authentication`] if the token endpoint
    /// rejects the credentials or cannot be reached. Not retried.
    pub async fn authenticate(&self) -> ApplicationResult<()> {
        let mut state = self.store.lock().await;
        self.authenticate_locked(&mut state).await.map(drop)
    }

    /// Refreshes the access token, falling back to a full authentication.
    ///
    /// Without a refresh token this authenticates directly. If the refresh
    /// fails for any reason the tokens are cleared and a new pair is
    /// requested with the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Authentication`] if the fallback fails.
    pub async fn refresh_access_token(&self) -> ApplicationResult<()> {
        let mut state = self.store.lock().await;
        self.refresh_locked(&mut state).await.map(drop)
    }

    /// Returns an access token that is not expired or inside the leeway.
    ///
    /// A usable token is returned without any network call. Otherwise
    /// exactly one refresh (or authentication, if no refresh token is held)
    /// runs first, with the usual fallback.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Authentication`] if no token could be obtained.
    pub async fn valid_token(&self) -> ApplicationResult<String> {
        let mut state = self.store.lock().await;
        self.valid_token_locked(&mut state).await
    }

    /// Handles a 401 for `rejected` and returns the token to retry with.
    ///
    /// If the store already holds a different token, that one is used
    /// (after the usual validity check) instead of refreshing again.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Authentication`] if no token could be obtained.
    pub async fn refresh_rejected(&self, rejected: &str) -> ApplicationResult<String> {
        let mut state = self.store.lock().await;
        let already_replaced = state
            .access_token
            .as_deref()
            .is_some_and(|current| current != rejected);
        if already_replaced {
            return self.valid_token_locked(&mut state).await;
        }
        warn!("access token rejected by server, refreshing");
        self.refresh_locked(&mut state).await
    }

    /// Discards all tokens; the next request authenticates again.
    pub async fn invalidate(&self) {
        let mut state = self.store.lock().await;
        state.clear();
        self.forget().await;
        info!("session invalidated");
    }

    async fn valid_token_locked(&self, state: &mut TokenState) -> ApplicationResult<String> {
        if self.store.is_usable(state, self.clock.now())
            && let Some(token) = &state.access_token
        {
            debug!("reusing stored access token");
            return Ok(token.clone());
        }
        self.refresh_locked(state).await
    }

    async fn authenticate_locked(&self, state: &mut TokenState) -> ApplicationResult<String> {
        let grant = self
            .api
            .request_token(&self.credentials)
            .await
            .map_err(|e| {
                warn!(error = %e, user = %self.credentials.username, "authentication failed");
                ApplicationError::Authentication(e)
            })?;

        let access_token = grant.access_token.clone();
        *state = TokenState::from_grant(grant, self.clock.now());
        info!(expires_at = ?state.expires_at, "authentication successful");
        self.persist(state).await;
        Ok(access_token)
    }

    async fn refresh_once_locked(&self, state: &mut TokenState) -> ApplicationResult<String> {
        let refresh_token = state
            .refresh_token
            .clone()
            .ok_or(ApplicationError::NoRefreshToken)?;

        let grant = self
            .api
            .refresh_token(&refresh_token)
            .await
            .map_err(ApplicationError::Refresh)?;

        let access_token = grant.access_token.clone();
        state.apply_refresh(grant, self.clock.now());
        info!(expires_at = ?state.expires_at, "access token refreshed");
        self.persist(state).await;
        Ok(access_token)
    }

    async fn refresh_locked(&self, state: &mut TokenState) -> ApplicationResult<String> {
        if !state.can_refresh() {
            debug!("no refresh token held, authenticating");
            return self.authenticate_locked(state).await;
        }

        match self.refresh_once_locked(state).await {
            Ok(token) => Ok(token),
            Err(e) => {
                warn!(error = %e, "token refresh failed, clearing tokens and re-authenticating");
                state.clear();
                self.forget().await;
                self.authenticate_locked(state).await
            }
        }
    }

    async fn persist(&self, state: &TokenState) {
        if let Some(cache) = &self.cache
            && let Err(e) = cache.save(state).await
        {
            warn!(error = %e, "failed to save token cache");
        }
    }

    async fn forget(&self) {
        if let Some(cache) = &self.cache
            && let Err(e) = cache.clear().await
        {
            warn!(error = %e, "failed to clear token cache");
        }
    }
}
