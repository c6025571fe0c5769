//! In-memory token storage with expiry tracking.
//!
//! The store holds the one token pair of the process behind an async mutex.
//! Holding the guard across a refresh is what keeps refresh and
//! re-authentication single-flight.

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::{Mutex, MutexGuard};

use kiosk_domain::TokenState;

/// Seconds before expiry at which a token is refreshed proactively.
pub const DEFAULT_LEEWAY_SECONDS: i64 = 60;

/// Single-slot token store.
#[derive(Debug)]
pub struct TokenStore {
    state: Mutex<TokenState>,
    /// Window before expiry in which the token already counts as expiring.
    leeway: TimeDelta,
}

impl TokenStore {
    /// Create an empty token store with the default leeway.
    #[must_use]
    pub fn new() -> Self {
        Self::with_leeway(TimeDelta::seconds(DEFAULT_LEEWAY_SECONDS))
    }

    /// Create with a custom leeway.
    #[must_use]
    pub fn with_leeway(leeway: TimeDelta) -> Self {
        Self {
            state: Mutex::new(TokenState::empty()),
            leeway,
        }
    }

    /// The proactive refresh window.
    #[must_use]
    pub const fn leeway(&self) -> TimeDelta {
        self.leeway
    }

    /// Locks the state for a check-and-update sequence.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, TokenState> {
        self.state.lock().await
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> TokenState {
        self.state.lock().await.clone()
    }

    /// Returns true if `state` holds an access token that is usable at `now`.
    #[must_use]
    pub fn is_usable(&self, state: &TokenState, now: DateTime<Utc>) -> bool {
        state.has_access_token() && !state.is_expired_or_expiring(now, self.leeway)
    }

    /// Get token status for display.
    pub async fn status(&self, now: DateTime<Utc>) -> TokenStatus {
        let state = self.state.lock().await;
        self.status_of(&state, now)
    }

    fn status_of(&self, state: &TokenState, now: DateTime<Utc>) -> TokenStatus {
        if !state.has_access_token() {
            return TokenStatus::NotAuthenticated;
        }
        if state.is_expired_or_expiring(now, TimeDelta::zero()) {
            TokenStatus::Expired {
                can_refresh: state.can_refresh(),
            }
        } else if state.is_expired_or_expiring(now, self.leeway) {
            TokenStatus::Expiring {
                seconds_remaining: state.seconds_until_expiry(now).unwrap_or(0),
                can_refresh: state.can_refresh(),
            }
        } else {
            TokenStatus::Valid {
                seconds_remaining: state.seconds_until_expiry(now),
            }
        }
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Status of the stored token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// No access token is held.
    NotAuthenticated,
    /// Token is valid and not expiring soon.
    Valid {
        /// Seconds until expiry, or None if no expiry.
        seconds_remaining: Option<i64>,
    },
    /// Token is valid but inside the leeway window.
    Expiring {
        /// Seconds until expiry.
        seconds_remaining: i64,
        /// Whether the token can be refreshed.
        can_refresh: bool,
    },
    /// Token has expired.
    Expired {
        /// Whether the token can be refreshed.
        can_refresh: bool,
    },
}

impl TokenStatus {
    /// Get a short description for logs and diagnostics.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "Not authenticated".to_string(),
            Self::Valid {
                seconds_remaining: Some(secs),
            } => {
                if *secs > 3600 {
                    format!("Valid for {} hours", secs / 3600)
                } else if *secs > 60 {
                    format!("Valid for {} minutes", secs / 60)
                } else {
                    format!("Valid for {secs} seconds")
                }
            }
            Self::Valid {
                seconds_remaining: None,
            } => "Valid (no expiry)".to_string(),
            Self::Expiring {
                seconds_remaining,
                can_refresh,
            } => {
                let hint = if *can_refresh {
                    " (will refresh)"
                } else {
                    " (will re-authenticate)"
                };
                format!("Expiring in {seconds_remaining} seconds{hint}")
            }
            Self::Expired { can_refresh } => {
                if *can_refresh {
                    "Expired (can refresh)".to_string()
                } else {
                    "Expired".to_string()
                }
            }
        }
    }
}
