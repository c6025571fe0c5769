//! Plain-text rendering for terminal kiosks.

use std::fmt::Write as _;

use kiosk_domain::TextDirection;

use crate::bridge::UiUpdate;
use crate::strings;
use crate::view::{FatalView, MessageView, ScreenView};

/// Renders views as fixed-width text blocks.
///
/// Right-to-left views are right-aligned to the block width.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    width: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH)
    }
}

impl TextRenderer {
    /// Block width used by [`TextRenderer::default`].
    pub const DEFAULT_WIDTH: usize = 60;

    /// Creates a renderer producing blocks `width` characters wide.
    #[must_use]
    pub const fn new(width: usize) -> Self {
        Self { width }
    }

    /// Renders one update. `clock` is the formatted date/time for the header.
    ///
    /// Returns `None` for updates with nothing to draw.
    #[must_use]
    pub fn render(&self, update: &UiUpdate, clock: &str) -> Option<String> {
        match update {
            UiUpdate::LanguageChanged { .. } => None,
            UiUpdate::Screen(view) => Some(self.render_screen(view, clock)),
            UiUpdate::Message(view) => Some(self.render_message(view)),
            UiUpdate::Fatal(view) => Some(self.render_fatal(view)),
        }
    }

    /// Header with bank, branch and clock, then the numbered button grid
    /// and the language switch.
    ///
    /// Buttons that do nothing are listed without a number.
    #[must_use]
    pub fn render_screen(&self, view: &ScreenView, clock: &str) -> String {
        let mut lines = vec![
            view.bank_name.clone(),
            view.branch_name.clone(),
            clock.to_string(),
        ];
        lines.push(String::new());
        for button in &view.buttons {
            if button.actionable {
                lines.push(format!("{:>2}. {}", button.index + 1, button.label));
            } else {
                lines.push(format!("  - {}", button.label));
            }
        }
        let other = view.language.toggled();
        lines.push(String::new());
        lines.push(format!("[{}] {}", other.code(), strings::language_name(other)));
        self.block(view.direction, &lines)
    }

    /// Message text and the back prompt.
    #[must_use]
    pub fn render_message(&self, view: &MessageView) -> String {
        let lines = [view.text.clone(), String::new(), format!("[b] {}", view.back_label)];
        self.block(view.direction, &lines)
    }

    /// Critical error screen.
    #[must_use]
    pub fn render_fatal(&self, view: &FatalView) -> String {
        let lines = [view.title.to_uppercase(), String::new(), view.text.clone()];
        self.block(view.direction, &lines)
    }

    fn block(&self, direction: TextDirection, lines: &[String]) -> String {
        let rule = "=".repeat(self.width);
        let mut out = String::new();
        let _ = writeln!(out, "{rule}");
        for line in lines {
            match direction {
                TextDirection::LeftToRight => {
                    let _ = writeln!(out, "{line}");
                }
                TextDirection::RightToLeft => {
                    let pad = self.width.saturating_sub(line.chars().count());
                    let _ = writeln!(out, "{}{line}", " ".repeat(pad));
                }
            }
        }
        let _ = writeln!(out, "{rule}");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ButtonView;
    use kiosk_domain::Language;
    use pretty_assertions::assert_eq;

    fn view(direction: TextDirection) -> ScreenView {
        ScreenView {
            language: Language::English,
            direction,
            bank_name: "Arab Bank".to_string(),
            branch_name: "Main".to_string(),
            buttons: vec![
                ButtonView {
                    index: 0,
                    label: "Cash".to_string(),
                    actionable: true,
                },
                ButtonView {
                    index: 1,
                    label: "Survey".to_string(),
                    actionable: false,
                },
            ],
        }
    }

    #[test]
    fn test_render_screen_ltr() {
        let out = TextRenderer::new(10).render_screen(&view(TextDirection::LeftToRight), "now");

        assert_eq!(
            out,
            "==========\nArab Bank\nMain\nnow\n\n 1. Cash\n  - Survey\n\n[ar] العربية\n==========\n"
        );
    }

    #[test]
    fn test_render_screen_rtl_right_aligns() {
        let out = TextRenderer::new(10).render_screen(&view(TextDirection::RightToLeft), "now");
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines[1], " Arab Bank");
        assert_eq!(lines[2], "      Main");
    }

    #[test]
    fn test_render_screen_offers_other_language() {
        let mut arabic = view(TextDirection::RightToLeft);
        arabic.language = Language::Arabic;

        let out = TextRenderer::new(10).render_screen(&arabic, "now");

        assert_eq!(out.lines().nth_back(1), Some("[en] English"));
    }

    #[test]
    fn test_render_message_and_fatal() {
        let renderer = TextRenderer::new(5);
        let message = renderer.render_message(&MessageView {
            direction: TextDirection::LeftToRight,
            text: "Hi".to_string(),
            back_label: "Back",
        });
        assert!(message.contains("[b] Back"));

        let fatal = renderer.render(
            &UiUpdate::Fatal(FatalView {
                direction: TextDirection::LeftToRight,
                title: "Application Error",
                text: "failed".to_string(),
            }),
            "",
        );
        assert!(fatal.is_some_and(|f| f.contains("APPLICATION ERROR")));
    }

    #[test]
    fn test_language_change_draws_nothing() {
        let update = UiUpdate::LanguageChanged {
            language: Language::Arabic,
            direction: TextDirection::RightToLeft,
        };
        assert_eq!(TextRenderer::default().render(&update, ""), None);
    }
}
