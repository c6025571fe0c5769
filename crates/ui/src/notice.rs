//! Turning failures into something a kiosk user can read.

use kiosk_application::ApplicationError;
use kiosk_domain::{Language, LocalizedText};

use crate::strings::{self, Phrase};
use crate::view::FatalView;

/// How a failure affects the kiosk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The kiosk cannot continue; an error screen replaces everything.
    Critical,
    /// Shown as a message screen; Back returns to the grid.
    Recoverable,
}

/// A user-facing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    /// Effect on the kiosk.
    pub severity: Severity,
    /// Text shown to the user.
    pub message: LocalizedText,
    /// Language current when the failure happened.
    pub language: Language,
}

impl ErrorNotice {
    /// Classifies `error` for display.
    ///
    /// Transport failures replace `message` with the "cannot connect" text;
    /// everything else shows `message` as given.
    #[must_use]
    pub fn classify(
        error: &ApplicationError,
        severity: Severity,
        language: Language,
        message: Phrase,
    ) -> Self {
        let message = if error.is_network() {
            strings::CONNECTION
        } else {
            message
        };
        Self {
            severity,
            message: message.localized(),
            language,
        }
    }

    /// Returns true for [`Severity::Critical`].
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }

    /// Text in the notice's language.
    #[must_use]
    pub fn text(&self) -> &str {
        self.message.get(self.language)
    }

    /// The error screen for a critical notice.
    #[must_use]
    pub fn fatal_view(&self) -> FatalView {
        FatalView {
            direction: self.language.direction(),
            title: strings::ERROR_TITLE.get(self.language),
            text: self.text().to_string(),
        }
    }
}
