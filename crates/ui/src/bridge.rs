//! UI Bridge Module
//!
//! Defines the messages exchanged between the presentation front end
//! (terminal, GUI, web view) and the kiosk state machine.

use kiosk_domain::{Language, ScreenData, TextDirection};

use crate::notice::ErrorNotice;
use crate::view::{FatalView, MessageView, ScreenView};

/// Inputs to [`crate::KioskState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// User picked a language.
    ChangeLanguage(Language),

    /// User pressed the grid button at this index.
    PressButton(usize),

    /// User pressed Back on the message screen.
    Back,

    /// A screen design arrived from the API.
    ScreenLoaded(ScreenData),

    /// Something failed and the user must be told.
    ReportError(ErrorNotice),
}

/// Outputs of [`crate::KioskState`], applied by the front end in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    /// Switch document language and layout direction.
    LanguageChanged {
        /// New language.
        language: Language,
        /// Its layout direction.
        direction: TextDirection,
    },

    /// Show the button grid.
    Screen(ScreenView),

    /// Hide the grid and show a message with a back button.
    Message(MessageView),

    /// Replace everything with a blocking error screen.
    Fatal(FatalView),
}
