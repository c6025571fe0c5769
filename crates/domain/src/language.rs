//! Display languages and bilingual text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Languages the kiosk can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// English (default).
    #[default]
    #[serde(rename = "en")]
    English,
    /// Arabic.
    #[serde(rename = "ar")]
    Arabic,
}

impl Language {
    /// Returns the BCP 47 language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Arabic => "ar",
        }
    }

    /// Returns the writing direction for this language.
    #[must_use]
    pub const fn direction(self) -> TextDirection {
        match self {
            Self::English => TextDirection::LeftToRight,
            Self::Arabic => TextDirection::RightToLeft,
        }
    }

    /// Returns the other supported language.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::English => Self::Arabic,
            Self::Arabic => Self::English,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "ar" | "arabic" => Ok(Self::Arabic),
            other => Err(DomainError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Writing direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextDirection {
    /// Left to right (`ltr`).
    #[serde(rename = "ltr")]
    LeftToRight,
    /// Right to left (`rtl`).
    #[serde(rename = "rtl")]
    RightToLeft,
}

/// A piece of text available in both kiosk languages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalizedText {
    /// English text.
    pub english: String,
    /// Arabic text.
    pub arabic: String,
}

impl LocalizedText {
    /// Creates a new bilingual text.
    #[must_use]
    pub fn new(english: impl Into<String>, arabic: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            arabic: arabic.into(),
        }
    }

    /// Returns the text for the given language.
    #[must_use]
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::English => &self.english,
            Language::Arabic => &self.arabic,
        }
    }

    /// Prepends a per-language prefix, e.g. a sentence lead-in.
    #[must_use]
    pub fn prefixed(&self, prefix: &Self) -> Self {
        Self {
            english: format!("{}{}", prefix.english, self.english),
            arabic: format!("{}{}", prefix.arabic, self.arabic),
        }
    }
}
