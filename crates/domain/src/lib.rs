//! Kiosk Domain - Core business types
//!
//! This crate defines the domain model for the branch kiosk client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod language;
pub mod screen;

pub use auth::{BankIdentity, Credentials, RefreshGrant, TokenGrant, TokenState};
pub use error::{DomainError, DomainResult};
pub use language::{Language, LocalizedText, TextDirection};
pub use screen::{Button, ButtonAction, MAX_DISPLAYED_BUTTONS, ScreenData};
