//! UI state management.

mod kiosk_state;

pub use kiosk_state::{KioskState, Mode};
