//! Kiosk configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. a config file (`KIOSK_CONFIG`, default `kiosk.toml`; any format the
//!    `config` crate understands)
//! 3. environment variables `KIOSK_<SECTION>__<KEY>`, e.g.
//!    `KIOSK_CREDENTIALS__PASSWORD`

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::TimeDelta;
use config::{Config, Environment, File};
use secrecy::Secret;
use serde::Deserialize;
use url::Url;

use kiosk_application::BootstrapPolicy;
use kiosk_domain::{BankIdentity, Credentials, Language, LocalizedText};

use crate::adapters::DEFAULT_TIMEOUT;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "KIOSK_CONFIG";
/// Config file read when `KIOSK_CONFIG` is unset. Optional.
pub const DEFAULT_CONFIG_PATH: &str = "kiosk.toml";

const ENV_PREFIX: &str = "KIOSK";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or a value has the wrong type.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Values were read but are not acceptable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// API endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the configuration API.
    pub base_url: Url,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Bank and branch the kiosk serves.
#[derive(Debug, Clone, Deserialize)]
pub struct BankConfig {
    /// Bank name in English; also sent as `bankName` when authenticating.
    pub name_english: String,
    /// Bank name in Arabic.
    pub name_arabic: String,
    /// Branch whose screen design is shown.
    pub branch_id: String,
}

/// API user credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsConfig {
    /// API user name.
    pub username: String,
    /// API password.
    pub password: Secret<String>,
}

/// Token lifecycle settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Seconds before expiry at which tokens are refreshed.
    pub leeway_secs: i64,
    /// Startup authentication policy.
    pub bootstrap: BootstrapPolicy,
    /// Where to persist tokens between runs. No cache when unset.
    #[serde(default)]
    pub token_cache_path: Option<PathBuf>,
}

/// Presentation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Language shown at startup.
    pub language: Language,
    /// Re-fetch the screen design this often. Disabled when unset.
    #[serde(default)]
    pub refresh_interval_secs: Option<u64>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human readable output.
    #[default]
    Compact,
    /// Multi-line human readable output.
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Name as written in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `kiosk=debug`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

/// Complete kiosk configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct KioskConfig {
    /// API endpoint.
    pub api: ApiConfig,
    /// Bank identity.
    pub bank: BankConfig,
    /// API credentials.
    pub credentials: CredentialsConfig,
    /// Token lifecycle.
    pub auth: AuthConfig,
    /// Presentation.
    pub display: DisplayConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

impl KioskConfig {
    /// Loads configuration from `KIOSK_CONFIG` (or `kiosk.toml`) and the environment.
    ///
    /// The default file is optional; a file named by `KIOSK_CONFIG` must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be read, a required key is
    /// missing, or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::build(Some((Path::new(&path), true)), None),
            None => Self::build(Some((Path::new(DEFAULT_CONFIG_PATH), false)), None),
        }
    }

    /// Loads configuration from a specific file plus the environment.
    ///
    /// # Errors
    ///
    /// Same as [`KioskConfig::load`]; the file must exist.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        Self::build(Some((path, true)), None)
    }

    fn build(
        file: Option<(&Path, bool)>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .set_default("api.timeout_secs", DEFAULT_TIMEOUT.as_secs())?
            .set_default("auth.leeway_secs", 60)?
            .set_default("auth.bootstrap", "reuse_cached")?
            .set_default("display.language", "en")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "compact")?;

        if let Some((path, required)) = file {
            settings = settings.add_source(File::from(path).required(required));
        }

        settings = settings.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.api.base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must be http or https, got {}",
                self.api.base_url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be positive".to_string(),
            ));
        }
        if self.bank.branch_id.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "bank.branch_id must not be empty".to_string(),
            ));
        }
        if self.auth.leeway_secs < 0 || TimeDelta::try_seconds(self.auth.leeway_secs).is_none()
        {
            return Err(ConfigError::Invalid(format!(
                "auth.leeway_secs must be between 0 and {}, got {}",
                TimeDelta::MAX.num_seconds(),
                self.auth.leeway_secs
            )));
        }
        if self.display.refresh_interval_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "display.refresh_interval_secs must be positive".to_string(),
            ));
        }
        self.credentials()?;
        Ok(())
    }

    /// Credentials for the token endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a credential field is blank.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        Credentials::new(
            self.credentials.username.clone(),
            self.credentials.password.clone(),
            self.bank.name_english.clone(),
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Bank identity shown by the kiosk.
    #[must_use]
    pub fn bank(&self) -> BankIdentity {
        BankIdentity::new(
            LocalizedText::new(&self.bank.name_english, &self.bank.name_arabic),
            self.bank.branch_id.clone(),
        )
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Proactive refresh window.
    #[must_use]
    pub fn leeway(&self) -> TimeDelta {
        TimeDelta::try_seconds(self.auth.leeway_secs).unwrap_or(TimeDelta::MAX)
    }

    /// Periodic refresh interval, if enabled.
    #[must_use]
    pub fn refresh_interval(&self) -> Option<Duration> {
        self.display.refresh_interval_secs.map(Duration::from_secs)
    }
}
