//! Keyboard input of the terminal kiosk.

use kiosk_domain::Language;
use kiosk_ui::UiCommand;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Forward to the kiosk state.
    Command(UiCommand),
    /// Fetch the screen design now.
    Refresh,
    /// Draw the current screen again (updates the clock).
    Redraw,
    /// Leave the kiosk.
    Quit,
}

impl Input {
    /// Help line shown under every screen.
    pub const HELP: &'static str = "[1-15] press button  [en|ar] language  [b] back  [r] refresh  [q] quit";

    /// Parses a line. Returns `None` for unrecognized input.
    ///
    /// Button numbers are 1-based on screen and 0-based in [`UiCommand::PressButton`].
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" => return Some(Self::Redraw),
            "q" | "quit" | "exit" => return Some(Self::Quit),
            "b" | "back" => return Some(Self::Command(UiCommand::Back)),
            "r" | "refresh" => return Some(Self::Refresh),
            _ => {}
        }
        if let Ok(language) = line.parse::<Language>() {
            return Some(Self::Command(UiCommand::ChangeLanguage(language)));
        }
        match line.parse::<usize>() {
            Ok(n) if n >= 1 => Some(Self::Command(UiCommand::PressButton(n - 1))),
            _ => None,
        }
    }
}
