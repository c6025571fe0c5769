//! Authentication domain types

mod credentials;
mod token;

pub use credentials::{BankIdentity, Credentials};
pub use token::{RefreshGrant, TokenGrant, TokenState};
