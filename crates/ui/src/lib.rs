//! Kiosk UI - Presentation layer
//!
//! A toolkit-free view model of the kiosk: localized strings, the button
//! grid and message screen state machine, error notices, the header clock
//! and a plain-text renderer. Front ends send [`UiCommand`]s and draw the
//! resulting [`UiUpdate`]s.

pub mod bridge;
pub mod datetime;
pub mod notice;
pub mod render;
pub mod state;
pub mod strings;
pub mod view;

pub use bridge::{UiCommand, UiUpdate};
pub use datetime::format_datetime;
pub use notice::{ErrorNotice, Severity};
pub use render::TextRenderer;
pub use state::{KioskState, Mode};
pub use view::{ButtonView, FatalView, MessageView, ScreenView};
