//! The terminal kiosk loop.

use std::io::{self, Write};
use std::time::Duration;

use chrono::Local;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use kiosk_application::{ApplicationError, Clock, ConfigurationApi, KioskService};
use kiosk_domain::Language;
use kiosk_ui::strings::{self, Phrase};
use kiosk_ui::{
    ErrorNotice, KioskState, Severity, TextRenderer, UiCommand, UiUpdate, format_datetime,
};

use crate::input::Input;

/// Service, presentation state and renderer of one kiosk.
pub struct KioskApp<A, C> {
    service: KioskService<A, C>,
    state: KioskState,
    renderer: TextRenderer,
    refresh_interval: Option<Duration>,
}

impl<A: ConfigurationApi, C: Clock> KioskApp<A, C> {
    /// Creates the kiosk. Nothing is fetched until [`KioskApp::start`].
    pub fn new(
        service: KioskService<A, C>,
        language: Language,
        refresh_interval: Option<Duration>,
    ) -> Self {
        let state = KioskState::new(service.bank().clone(), language);
        Self {
            service,
            state,
            renderer: TextRenderer::default(),
            refresh_interval,
        }
    }

    /// Presentation state.
    pub const fn state(&self) -> &KioskState {
        &self.state
    }

    /// Bootstraps the API session and loads the first screen design.
    ///
    /// Either failure is critical and ends in a fatal screen.
    pub async fn start(&mut self) -> Vec<UiUpdate> {
        if let Err(e) = self.service.initialize_api_service().await {
            error!(error = %e, "failed to initialize api service");
            return self.fail(&e, strings::STARTUP_FAILED);
        }
        let token = self.service.session().status().await;
        info!(token = %token.display_message(), "api service initialized");

        match self.service.fetch_screen_data().await {
            Ok(screen) => {
                info!(buttons = screen.buttons.len(), "initial screen design loaded");
                self.state.handle(UiCommand::ScreenLoaded(screen))
            }
            Err(e) => {
                error!(error = %e, "failed to load initial screen design");
                self.fail(&e, strings::SCREEN_LOAD_FAILED)
            }
        }
    }

    /// Re-fetches the screen design. Failures keep the current data.
    pub async fn refresh(&mut self) -> Vec<UiUpdate> {
        if self.state.has_failed() {
            return Vec::new();
        }
        match self.service.fetch_screen_data().await {
            Ok(screen) => {
                debug!("screen design refreshed");
                self.state.handle(UiCommand::ScreenLoaded(screen))
            }
            Err(e) => {
                warn!(error = %e, "screen refresh failed, keeping previous screen");
                Vec::new()
            }
        }
    }

    fn fail(&mut self, error: &ApplicationError, message: Phrase) -> Vec<UiUpdate> {
        let notice =
            ErrorNotice::classify(error, Severity::Critical, self.state.language(), message);
        self.state.handle(UiCommand::ReportError(notice))
    }

    /// Draws `updates` to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn draw<W: Write>(&self, updates: &[UiUpdate], out: &mut W) -> io::Result<()> {
        let clock = format_datetime(&Local::now().naive_local(), self.state.language());
        for update in updates {
            if let Some(text) = self.renderer.render(update, &clock) {
                out.write_all(text.as_bytes())?;
            }
        }
        if !updates.is_empty() && !self.state.has_failed() {
            writeln!(out, "{}", Input::HELP)?;
        }
        out.flush()
    }

    /// Runs the kiosk until `input` ends or the user quits.
    ///
    /// Input lines and refresh ticks are handled one at a time, so fetches
    /// never overlap.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run<R, W>(mut self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "{}", strings::LOADING.get(self.state.language()))?;
        let updates = self.start().await;
        self.draw(&updates, out)?;

        let mut ticker = self.refresh_interval.map(|period| {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        let mut lines = input.lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match Input::parse(&line) {
                        Some(Input::Quit) => break,
                        Some(Input::Command(command)) => {
                            let updates = self.state.handle(command);
                            self.draw(&updates, out)?;
                        }
                        Some(Input::Refresh) => {
                            let updates = self.refresh().await;
                            self.draw(&updates, out)?;
                        }
                        Some(Input::Redraw) => self.draw(&self.state.current_view(), out)?,
                        None => writeln!(out, "{}", Input::HELP)?,
                    }
                }
                () = next_tick(ticker.as_mut()) => {
                    let updates = self.refresh().await;
                    self.draw(&updates, out)?;
                }
            }
        }

        info!("kiosk stopped");
        Ok(())
    }
}

async fn next_tick(interval: Option<&mut Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
