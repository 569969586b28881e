//! Input handling for the interactive host.
//!
//! Key presses are translated into player operations; the returned
//! [`InputResult`](crate::player::state::InputResult) tells the loop whether
//! to keep going.

mod keyboard;

pub use keyboard::{handle_key_event, EVENT_STEP, EVENT_STEP_LARGE, TIME_STEP_MS};
