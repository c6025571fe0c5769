//! Configuration API port

use async_trait::async_trait;
use thiserror::Error;

use kiosk_domain::{Credentials, RefreshGrant, ScreenData, TokenGrant};

/// Errors returned by a [`ConfigurationApi`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// The request timed out.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that was exceeded.
        timeout_ms: u64,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established or was dropped.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status returned for a missing, expired or revoked token.
    pub const UNAUTHORIZED: u16 = 401;

    /// Creates a [`ApiError::Status`] error.
    #[must_use]
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Returns the HTTP status, if the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for a 401 response.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == Self::UNAUTHORIZED)
    }

    /// Returns true if no HTTP response was received.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::ConnectionRefused { .. } | Self::ConnectionFailed(_)
        )
    }
}

/// Parameters of a screen design request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenQuery {
    /// Branch whose screen is requested.
    pub branch_id: String,
    /// Only return buttons allocated to the branch.
    pub only_allocated: bool,
}

impl ScreenQuery {
    /// Query for the allocated buttons of a branch.
    #[must_use]
    pub fn allocated(branch_id: impl Into<String>) -> Self {
        Self {
            branch_id: branch_id.into(),
            only_allocated: true,
        }
    }
}

/// Port for the remote configuration API.
///
/// Implementations perform exactly one HTTP exchange per call and never
/// retry; token lifecycle decisions belong to the caller.
#[async_trait]
pub trait ConfigurationApi: Send + Sync {
    /// Exchanges credentials for a token pair.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for a non-2xx answer, or a transport error.
    async fn request_token(&self, credentials: &Credentials) -> Result<TokenGrant, ApiError>;

    /// Exchanges a refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for a non-2xx answer, or a transport error.
    async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshGrant, ApiError>;

    /// Fetches the screen design using the given bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for a non-2xx answer (401 included),
    /// [`ApiError::InvalidResponse`] for an unexpected body, or a transport error.
    async fn screen_design(
        &self,
        access_token: &str,
        query: &ScreenQuery,
    ) -> Result<ScreenData, ApiError>;
}
