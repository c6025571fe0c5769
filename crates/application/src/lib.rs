//! Kiosk Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the clock, the configuration API and the token cache)
//! - The authenticated session that owns the token lifecycle
//! - Use case orchestration for fetching screen data
//! - Application-level error handling

pub mod auth;
pub mod error;
pub mod ports;
pub mod service;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{AuthSession, DEFAULT_LEEWAY_SECONDS, TokenStatus, TokenStore};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{ApiError, Clock, ConfigurationApi, ScreenQuery, TokenCache, TokenCacheError};
pub use service::{BootstrapPolicy, KioskService};
pub use use_cases::FetchScreenData;
