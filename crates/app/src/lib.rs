//! Branch kiosk client
//!
//! Wires the configuration API adapter, the authenticated session and the
//! presentation state into a terminal kiosk.

pub mod input;
pub mod kiosk_app;
pub mod telemetry;

use std::sync::Arc;

use thiserror::Error;

use kiosk_application::{ApiError, AuthSession, KioskService};
use kiosk_infrastructure::{
    ConfigError, FileTokenCache, KioskConfig, ReqwestConfigurationApi, SystemClock,
};

pub use input::Input;
pub use kiosk_app::KioskApp;

/// The kiosk service with its production adapters.
pub type Service = KioskService<ReqwestConfigurationApi, SystemClock>;

/// Errors that stop the kiosk before its first screen.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be created.
    #[error("failed to create API client: {0}")]
    Client(#[from] ApiError),
}

/// Builds the kiosk service described by `config`.
///
/// # Errors
///
/// Returns [`StartupError`] if the credentials are invalid or the HTTP
/// client cannot be created.
pub fn build_service(config: &KioskConfig) -> Result<Service, StartupError> {
    let api = Arc::new(ReqwestConfigurationApi::new(
        config.api.base_url.clone(),
        config.timeout(),
    )?);

    let mut session = AuthSession::new(
        Arc::clone(&api),
        Arc::new(SystemClock::new()),
        config.credentials()?,
    )
    .with_leeway(config.leeway());
    if let Some(path) = &config.auth.token_cache_path {
        session = session.with_token_cache(Arc::new(FileTokenCache::new(path)));
    }

    Ok(KioskService::new(
        Arc::new(session),
        api,
        config.bank(),
        config.auth.bootstrap,
    ))
}

/// Builds the kiosk app described by `config`.
///
/// # Errors
///
/// See [`build_service`].
pub fn build_app(
    config: &KioskConfig,
) -> Result<KioskApp<ReqwestConfigurationApi, SystemClock>, StartupError> {
    Ok(KioskApp::new(
        build_service(config)?,
        config.display.language,
        config.refresh_interval(),
    ))
}
