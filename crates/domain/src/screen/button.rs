//! Kiosk buttons and what pressing them does.

use serde::Serialize;

use crate::language::LocalizedText;

/// A single button on the kiosk grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    /// Label in both languages.
    pub name: LocalizedText,
    /// Outcome of pressing the button.
    pub action: ButtonAction,
}

impl Button {
    /// Creates a button.
    #[must_use]
    pub const fn new(name: LocalizedText, action: ButtonAction) -> Self {
        Self { name, action }
    }
}

/// What a button does when pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ButtonAction {
    /// Show a fixed message.
    ShowMessage {
        /// Message in both languages.
        message: LocalizedText,
    },
    /// Issue a queue ticket for a service.
    IssueTicket {
        /// Service name in both languages.
        service_name: LocalizedText,
    },
    /// A button type this client does not know; pressing it does nothing.
    Unsupported {
        /// The raw `buttonType` sent by the server.
        button_type: String,
    },
}

impl ButtonAction {
    /// Wire name of `ShowMessage` buttons.
    pub const SHOW_MESSAGE: &'static str = "ShowMessage";
    /// Wire name of `IssueTicket` buttons.
    pub const ISSUE_TICKET: &'static str = "IssueTicket";

    /// Builds an action from the server's `buttonType` and payload fields.
    ///
    /// Missing payload fields become empty strings; the server is trusted
    /// to send the fields its button type needs.
    #[must_use]
    pub fn from_wire(
        button_type: &str,
        message: LocalizedText,
        service_name: LocalizedText,
    ) -> Self {
        match button_type {
            Self::SHOW_MESSAGE => Self::ShowMessage { message },
            Self::ISSUE_TICKET => Self::IssueTicket { service_name },
            other => Self::Unsupported {
                button_type: other.to_string(),
            },
        }
    }

    /// Returns true if pressing the button has a visible outcome.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(self, Self::Unsupported { .. })
    }
}
