//! Application error types

use thiserror::Error;

use crate::ports::ApiError;

/// Application-level errors.
///
/// Each variant records which step of the flow failed and keeps the
/// underlying [`ApiError`] so callers can tell an HTTP rejection from a
/// transport failure. The API error is part of the message, not a
/// `source()`, so reporters print it once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// The token endpoint rejected the credentials or could not be reached.
    #[error("authentication failed: {0}")]
    Authentication(ApiError),

    /// The refresh endpoint rejected the refresh token or could not be reached.
    #[error("token refresh failed: {0}")]
    Refresh(ApiError),

    /// A refresh was requested but no refresh token is held.
    #[error("no refresh token available for refresh")]
    NoRefreshToken,

    /// The screen design request failed.
    #[error("failed to fetch screen design: {0}")]
    Fetch(ApiError),
}

impl ApplicationError {
    /// Returns the underlying API error, if any.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Authentication(e) | Self::Refresh(e) | Self::Fetch(e) => Some(e),
            Self::NoRefreshToken => None,
        }
    }

    /// Returns true if the failure happened below HTTP (no response at all).
    #[must_use]
    pub fn is_network(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_network)
    }

    /// Returns the HTTP status of a rejected request, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.api_error().and_then(ApiError::status)
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
