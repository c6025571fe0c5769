//! Clock port for token expiry decisions

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// Token expiry is always computed against this clock, so tests can move
/// time forward without sleeping.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
