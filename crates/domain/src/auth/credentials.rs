//! Static identity of the kiosk: API credentials and the bank/branch it serves.

use secrecy::{ExposeSecret, Secret};

use crate::error::{DomainError, DomainResult};
use crate::language::LocalizedText;

/// Credentials sent to the token endpoint.
///
/// Loaded once at startup and read-only afterwards. The password is kept
/// in a [`Secret`] so it never shows up in `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// API user name.
    pub username: String,
    /// API password.
    pub password: Secret<String>,
    /// Bank the user belongs to.
    pub bank_name: String,
}

impl Credentials {
    /// Creates a validated set of credentials.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyValue`] if any field is blank.
    pub fn new(
        username: impl Into<String>,
        password: Secret<String>,
        bank_name: impl Into<String>,
    ) -> DomainResult<Self> {
        let username = username.into();
        let bank_name = bank_name.into();

        if username.trim().is_empty() {
            return Err(DomainError::EmptyValue("username"));
        }
        if password.expose_secret().is_empty() {
            return Err(DomainError::EmptyValue("password"));
        }
        if bank_name.trim().is_empty() {
            return Err(DomainError::EmptyValue("bank name"));
        }

        Ok(Self {
            username,
            password,
            bank_name,
        })
    }
}

/// The bank and branch this kiosk is installed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankIdentity {
    /// Bank name in both languages.
    pub name: LocalizedText,
    /// Branch identifier used to scope screen design requests.
    pub branch_id: String,
}

impl BankIdentity {
    /// Creates a bank identity.
    #[must_use]
    pub fn new(name: LocalizedText, branch_id: impl Into<String>) -> Self {
        Self {
            name,
            branch_id: branch_id.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new(
            "kiosk-user",
            Secret::new("hunter2".to_string()),
            "Arab Bank",
        )
        .unwrap();

        let debug = format!("{creds:?}");
        assert!(debug.contains("kiosk-user"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_credentials_reject_blank_fields() {
        let err = Credentials::new(" ", Secret::new("pw".to_string()), "Bank").unwrap_err();
        assert_eq!(err, DomainError::EmptyValue("username"));

        let err = Credentials::new("user", Secret::new(String::new()), "Bank").unwrap_err();
        assert_eq!(err, DomainError::EmptyValue("password"));

        let err = Credentials::new("user", Secret::new("pw".to_string()), "").unwrap_err();
        assert_eq!(err, DomainError::EmptyValue("bank name"));
    }
}
