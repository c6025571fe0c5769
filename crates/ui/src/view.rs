//! Render-ready views of kiosk state.

use serde::Serialize;

use kiosk_domain::{BankIdentity, Language, LocalizedText, ScreenData, TextDirection};

use crate::strings;

/// One button on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    /// Position in the screen data; pass back in `PressButton`.
    pub index: usize,
    /// Label in the current language.
    pub label: String,
    /// False for buttons whose type this client does not handle.
    pub actionable: bool,
}

/// The main screen: header plus button grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenView {
    /// Language the view was built for.
    pub language: Language,
    /// Layout direction.
    pub direction: TextDirection,
    /// Bank name.
    pub bank_name: String,
    /// Branch name from the screen design.
    pub branch_name: String,
    /// At most [`kiosk_domain::MAX_DISPLAYED_BUTTONS`] buttons, in server order.
    pub buttons: Vec<ButtonView>,
}

impl ScreenView {
    /// Builds the view of `screen` for `language`.
    #[must_use]
    pub fn build(screen: &ScreenData, bank: &BankIdentity, language: Language) -> Self {
        Self {
            language,
            direction: language.direction(),
            bank_name: bank.name.get(language).to_string(),
            branch_name: screen.branch_name.get(language).to_string(),
            buttons: screen
                .displayed_buttons()
                .iter()
                .enumerate()
                .map(|(index, button)| ButtonView {
                    index,
                    label: button.name.get(language).to_string(),
                    actionable: button.action.is_actionable(),
                })
                .collect(),
        }
    }
}

/// A message shown in place of the grid, with a back button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    /// Layout direction.
    pub direction: TextDirection,
    /// Message text.
    pub text: String,
    /// Back button label.
    pub back_label: &'static str,
}

impl MessageView {
    /// Builds the view of `message` for `language`.
    #[must_use]
    pub fn build(message: &LocalizedText, language: Language) -> Self {
        Self {
            direction: language.direction(),
            text: message.get(language).to_string(),
            back_label: strings::BACK.get(language),
        }
    }
}

/// A blocking error screen. Nothing else is shown afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FatalView {
    /// Layout direction.
    pub direction: TextDirection,
    /// Screen title.
    pub title: &'static str,
    /// Explanation for the user.
    pub text: String,
}
