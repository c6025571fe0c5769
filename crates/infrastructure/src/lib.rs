//! Kiosk Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading.

pub mod adapters;
pub mod persistence;
pub mod settings;

pub use adapters::{DEFAULT_TIMEOUT, ReqwestConfigurationApi, SystemClock};
pub use persistence::FileTokenCache;
pub use settings::{ConfigError, KioskConfig, LogFormat};
