//! Adapters for the application ports.

mod reqwest_client;
mod system_clock;
mod wire;

pub use reqwest_client::{DEFAULT_TIMEOUT, ReqwestConfigurationApi};
pub use system_clock::SystemClock;
