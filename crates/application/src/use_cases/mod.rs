//! Application use cases (business logic orchestration).

mod fetch_screen_data;

pub use fetch_screen_data::*;
