//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The language code is not one of the supported locales.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// A required value is empty.
    #[error("{0} must not be empty")]
    EmptyValue(&'static str),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
