//! Screen design data for a branch.

mod button;

pub use button::{Button, ButtonAction};

use serde::Serialize;

use crate::language::LocalizedText;

/// Maximum number of buttons the kiosk grid shows.
pub const MAX_DISPLAYED_BUTTONS: usize = 15;

/// Screen design returned by the configuration API.
///
/// Each fetch produces a fresh value; it is never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenData {
    /// Branch name in both languages.
    pub branch_name: LocalizedText,
    /// Buttons in server order.
    pub buttons: Vec<Button>,
}

impl ScreenData {
    /// Creates screen data.
    #[must_use]
    pub const fn new(branch_name: LocalizedText, buttons: Vec<Button>) -> Self {
        Self {
            branch_name,
            buttons,
        }
    }

    /// The buttons that fit the grid, in original order.
    #[must_use]
    pub fn displayed_buttons(&self) -> &[Button] {
        let end = self.buttons.len().min(MAX_DISPLAYED_BUTTONS);
        &self.buttons[..end]
    }

    /// Looks up a displayed button by its grid index.
    #[must_use]
    pub fn displayed_button(&self, index: usize) -> Option<&Button> {
        self.displayed_buttons().get(index)
    }
}
