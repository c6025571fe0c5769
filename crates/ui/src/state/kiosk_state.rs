//! Presentation state of the kiosk.

use kiosk_domain::{BankIdentity, ButtonAction, Language, LocalizedText, ScreenData};

use crate::bridge::{UiCommand, UiUpdate};
use crate::notice::ErrorNotice;
use crate::strings;
use crate::view::{MessageView, ScreenView};

/// What the kiosk currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// The button grid (or a loading screen before the first design arrives).
    Grid,
    /// A message with a back button. Kept in both languages so a language
    /// switch can update it in place.
    Message(LocalizedText),
    /// A critical error. Terminal.
    Failed,
}

/// Current language, screen data and visible screen.
#[derive(Debug, Clone)]
pub struct KioskState {
    language: Language,
    bank: BankIdentity,
    screen: Option<ScreenData>,
    mode: Mode,
}

impl KioskState {
    /// Creates the state for `bank`, showing `language` and no screen data yet.
    #[must_use]
    pub const fn new(bank: BankIdentity, language: Language) -> Self {
        Self {
            language,
            bank,
            screen: None,
            mode: Mode::Grid,
        }
    }

    /// Current language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Visible screen.
    #[must_use]
    pub const fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Last screen design received.
    #[must_use]
    pub const fn screen(&self) -> Option<&ScreenData> {
        self.screen.as_ref()
    }

    /// Returns true once a critical error has been shown.
    #[must_use]
    pub const fn has_failed(&self) -> bool {
        matches!(self.mode, Mode::Failed)
    }

    /// View of the grid in the current language, if screen data is loaded.
    #[must_use]
    pub fn screen_view(&self) -> Option<ScreenView> {
        self.screen
            .as_ref()
            .map(|screen| ScreenView::build(screen, &self.bank, self.language))
    }

    /// Everything needed to draw the current state from scratch.
    #[must_use]
    pub fn current_view(&self) -> Vec<UiUpdate> {
        match &self.mode {
            Mode::Grid => self.screen_view().map(UiUpdate::Screen).into_iter().collect(),
            Mode::Message(text) => vec![UiUpdate::Message(MessageView::build(text, self.language))],
            Mode::Failed => Vec::new(),
        }
    }

    /// Applies a command and returns the updates the front end must apply.
    ///
    /// After a critical error every command is ignored.
    pub fn handle(&mut self, command: UiCommand) -> Vec<UiUpdate> {
        if self.has_failed() {
            return Vec::new();
        }

        match command {
            UiCommand::ChangeLanguage(language) => self.change_language(language),
            UiCommand::PressButton(index) => self.press_button(index),
            UiCommand::Back => self.back(),
            UiCommand::ScreenLoaded(screen) => self.screen_loaded(screen),
            UiCommand::ReportError(notice) => self.report(&notice),
        }
    }

    fn change_language(&mut self, language: Language) -> Vec<UiUpdate> {
        if language == self.language {
            return Vec::new();
        }
        self.language = language;

        let mut updates = vec![UiUpdate::LanguageChanged {
            language,
            direction: language.direction(),
        }];
        updates.extend(self.current_view());
        updates
    }

    fn press_button(&mut self, index: usize) -> Vec<UiUpdate> {
        if self.mode != Mode::Grid {
            return Vec::new();
        }
        let Some(button) = self
            .screen
            .as_ref()
            .and_then(|screen| screen.displayed_button(index))
        else {
            return Vec::new();
        };

        let message = match &button.action {
            ButtonAction::ShowMessage { message } => message.clone(),
            ButtonAction::IssueTicket { service_name } => {
                service_name.prefixed(&strings::TICKET_ISSUED.localized())
            }
            ButtonAction::Unsupported { .. } => return Vec::new(),
        };
        self.show_message(message)
    }

    fn back(&mut self) -> Vec<UiUpdate> {
        if !matches!(self.mode, Mode::Message(_)) {
            return Vec::new();
        }
        self.mode = Mode::Grid;
        self.current_view()
    }

    fn screen_loaded(&mut self, screen: ScreenData) -> Vec<UiUpdate> {
        self.screen = Some(screen);
        match self.mode {
            Mode::Grid => self.current_view(),
            // The new grid shows up when the user goes back.
            _ => Vec::new(),
        }
    }

    fn report(&mut self, notice: &ErrorNotice) -> Vec<UiUpdate> {
        if notice.is_critical() {
            self.mode = Mode::Failed;
            vec![UiUpdate::Fatal(notice.fatal_view())]
        } else {
            self.show_message(notice.message.clone())
        }
    }

    fn show_message(&mut self, message: LocalizedText) -> Vec<UiUpdate> {
        let view = MessageView::build(&message, self.language);
        self.mode = Mode::Message(message);
        vec![UiUpdate::Message(view)]
    }
}
