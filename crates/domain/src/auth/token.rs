//! Access/refresh token state with expiry tracking.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Tokens issued by a successful authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenGrant {
    /// Bearer token for API requests.
    pub access_token: String,
    /// Token used to obtain a new access token.
    pub refresh_token: Option<String>,
    /// Lifetime of the access token, if the server reported one.
    pub expires_in: Option<TimeDelta>,
}

/// Tokens issued by a successful refresh.
///
/// The refresh endpoint does not normally rotate the refresh token; if it
/// does, the new one replaces the stored one.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshGrant {
    /// New bearer token.
    pub access_token: String,
    /// Rotated refresh token, when the server sends one.
    pub refresh_token: Option<String>,
    /// Lifetime of the new access token.
    pub expires_in: Option<TimeDelta>,
}

/// The client's current token pair.
///
/// Either fully populated by a grant or fully cleared; callers never see a
/// half-updated state because every mutation replaces the fields together.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenState {
    /// Bearer token for API requests.
    pub access_token: Option<String>,
    /// Token used to obtain a new access token.
    pub refresh_token: Option<String>,
    /// When the access token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenState {
    /// Creates an empty (unauthenticated) state.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the state produced by an authentication response.
    #[must_use]
    pub fn from_grant(grant: TokenGrant, now: DateTime<Utc>) -> Self {
        Self {
            access_token: Some(grant.access_token),
            refresh_token: grant.refresh_token,
            expires_at: expiry(now, grant.expires_in),
        }
    }

    /// Replaces the access token (and expiry) after a refresh.
    pub fn apply_refresh(&mut self, grant: RefreshGrant, now: DateTime<Utc>) {
        self.access_token = Some(grant.access_token);
        self.expires_at = expiry(now, grant.expires_in);
        if let Some(rotated) = grant.refresh_token {
            self.refresh_token = Some(rotated);
        }
    }

    /// Discards all tokens.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    /// Returns true if no tokens are held at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }

    /// Returns true if an access token is held.
    #[must_use]
    pub const fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Returns true if the token can be refreshed.
    #[must_use]
    pub const fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Checks if the access token is expired or will expire within `leeway`.
    ///
    /// A token without a known expiry never counts as expiring; only a 401
    /// from the server can invalidate it.
    #[must_use]
    pub fn is_expired_or_expiring(&self, now: DateTime<Utc>, leeway: TimeDelta) -> bool {
        self.expires_at
            .is_some_and(|expires_at| {
                now.checked_add_signed(leeway)
                    .is_none_or(|deadline| deadline >= expires_at)
            })
    }

    /// Time until expiry in seconds, or None if no expiry is known.
    #[must_use]
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires_at.map(|exp| (exp - now).num_seconds())
    }
}

/// Absolute expiry for a lifetime starting at `now`.
///
/// A lifetime past chrono's representable range counts as no known expiry.
fn expiry(now: DateTime<Utc>, lifetime: Option<TimeDelta>) -> Option<DateTime<Utc>> {
    lifetime.and_then(|lifetime| now.checked_add_signed(lifetime))
}

fn redact(value: Option<&String>) -> &'static str {
    if value.is_some() { "<redacted>" } else { "<none>" }
}

impl fmt::Debug for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenState")
            .field("access_token", &redact(self.access_token.as_ref()))
            .field("refresh_token", &redact(self.refresh_token.as_ref()))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &redact(self.refresh_token.as_ref()))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl fmt::Debug for RefreshGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshGrant")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &redact(self.refresh_token.as_ref()))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
