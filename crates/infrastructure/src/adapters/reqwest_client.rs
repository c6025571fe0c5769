//! Configuration API client implementation using reqwest.
//!
//! This adapter implements the `ConfigurationApi` port: the token and
//! refresh endpoints and the branch screen design.

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response, Url};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::debug;

use kiosk_application::ports::{ApiError, ConfigurationApi, ScreenQuery};
use kiosk_domain::{Credentials, RefreshGrant, ScreenData, TokenGrant};

use super::wire::{
    RefreshRequest, ScreenDesignParams, ScreenDesignResponse, TokenRequest, TokenResponse,
};

const TOKEN_PATH: &str = "api/auth/token";
const REFRESH_PATH: &str = "api/auth/refresh";
const SCREEN_DESIGN_PATH: &str = "api/screen-design";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the kiosk configuration API.
///
/// Wraps a `reqwest::Client` and resolves endpoints against a base URL.
/// Non-2xx answers become [`ApiError::Status`] with the response body;
/// transport failures become the network variants of [`ApiError`].
#[derive(Debug, Clone)]
pub struct ReqwestConfigurationApi {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl ReqwestConfigurationApi {
    /// Creates a client for the API at `base_url`.
    ///
    /// Default configuration:
    /// - Request timeout: `timeout`
    /// - User-Agent: "branch-kiosk/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("branch-kiosk/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::ConnectionFailed(e.to_string()))?;

        Ok(Self::with_client(client, base_url, timeout))
    }

    /// Creates an adapter around a custom reqwest client.
    #[must_use]
    pub fn with_client(client: Client, mut base_url: Url, timeout: Duration) -> Self {
        // Url::join replaces the last segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            client,
            base_url,
            timeout,
        }
    }

    /// The base URL endpoints are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{e}: {path}")))
    }

    fn screen_design_url(&self, query: &ScreenQuery) -> Result<Url, ApiError> {
        let mut url = self.endpoint(SCREEN_DESIGN_PATH)?;
        let params = serde_urlencoded::to_string(ScreenDesignParams {
            branch_id: &query.branch_id,
            only_allocated: query.only_allocated,
        })
        .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.set_query(Some(&params));
        Ok(url)
    }

    /// Sends the request and decodes a 2xx JSON body.
    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let builder = builder.header(ACCEPT, mime::APPLICATION_JSON.as_ref());
        let response = builder
            .send()
            .await
            .map_err(|e| self.map_error(&e))?;

        let body = Self::read_body(response).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Reads the body, turning non-2xx answers into [`ApiError::Status`].
    async fn read_body(response: Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::ConnectionFailed(format!("failed to read body: {e}")))?;

        if status.is_success() {
            Ok(body)
        } else {
            debug!(status = status.as_u16(), "configuration API returned an error status");
            Err(ApiError::http(status.as_u16(), body))
        }
    }

    /// Maps reqwest errors to [`ApiError`].
    fn map_error(&self, error: &reqwest::Error) -> ApiError {
        if error.is_timeout() {
            return ApiError::Timeout {
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            };
        }

        if error.is_connect() {
            let refused = std::iter::successors(error.source(), |&e| e.source())
                .any(|e| e.to_string().to_lowercase().contains("refused"));
            if refused {
                let url = error.url();
                return ApiError::ConnectionRefused {
                    host: url
                        .and_then(Url::host_str)
                        .unwrap_or("unknown")
                        .to_string(),
                    port: url.and_then(Url::port_or_known_default).unwrap_or(80),
                };
            }
            return ApiError::ConnectionFailed(error.to_string());
        }

        if error.is_builder() {
            return ApiError::InvalidUrl(error.to_string());
        }

        ApiError::ConnectionFailed(error.to_string())
    }
}

#[async_trait]
impl ConfigurationApi for ReqwestConfigurationApi {
    async fn request_token(&self, credentials: &Credentials) -> Result<TokenGrant, ApiError> {
        let url = self.endpoint(TOKEN_PATH)?;
        let body = TokenRequest {
            user_name: &credentials.username,
            password: credentials.password.expose_secret(),
            bank_name: &credentials.bank_name,
        };

        let response: TokenResponse = self.send_json(self.client.post(url).json(&body)).await?;
        Ok(response.into_grant())
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshGrant, ApiError> {
        let url = self.endpoint(REFRESH_PATH)?;
        let body = RefreshRequest { refresh_token };

        let response: TokenResponse = self.send_json(self.client.post(url).json(&body)).await?;
        Ok(response.into_refresh_grant())
    }

    async fn screen_design(
        &self,
        access_token: &str,
        query: &ScreenQuery,
    ) -> Result<ScreenData, ApiError> {
        let url = self.screen_design_url(query)?;
        let response: ScreenDesignResponse = self
            .send_json(self.client.get(url).bearer_auth(access_token))
            .await?;
        Ok(response.into())
    }
}
