//! Authentication for the kiosk client.
//!
//! This module provides:
//! - The token store that holds the single token pair of the process
//! - The authenticated session that acquires, refreshes and invalidates it

mod session;
mod token_store;

pub use session::AuthSession;
pub use token_store::{DEFAULT_LEEWAY_SECONDS, TokenStatus, TokenStore};
