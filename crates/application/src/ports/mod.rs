//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod configuration_api;
mod token_cache;

pub use clock::Clock;
pub use configuration_api::{ApiError, ConfigurationApi, ScreenQuery};
pub use token_cache::{TokenCache, TokenCacheError};
