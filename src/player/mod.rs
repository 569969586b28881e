//! Timeline player for asciicast recordings
//!
//! Replays a parsed [`Session`](crate::asciicast::Session) against a
//! [`TerminalSurface`](crate::terminal::TerminalSurface), honoring recorded
//! delays, with pause/resume and event- or time-based seeking.
//!
//! # Architecture
//!
//! - `state`: lifecycle enum and the pure transition function
//! - `timer`/`clock`: the single pending deadline and its time source
//! - `notify`: observer channels for player events
//! - `playback/`: marker collection and time/index mapping
//! - `timeline`: the [`Player`] itself
//! - `input/` and `native`: the interactive host on a real terminal
//!
//! # Usage
//!
//! ```no_run
//! use castplay::player::{play_session, PlaybackResult};
//! use castplay::Config;
//! use std::path::Path;
//!
//! let result = play_session(Path::new("session.cast"), &Config::default()).unwrap();
//! match result {
//!     PlaybackResult::Finished => println!("Finished"),
//!     PlaybackResult::Interrupted => println!("Stopped by user"),
//! }
//! ```

pub mod clock;
pub mod error;
pub(crate) mod input;
mod native;
pub mod notify;
pub(crate) mod playback;
pub mod state;
pub mod timeline;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{parse_resize, MalformedEventError, PlayerError};
pub use native::{play_session, PlaybackResult};
pub use notify::{ErrorKind, PlayerEvent};
pub use state::{InputResult, InvalidTransition, MarkerPosition, PlayerState};
pub use timeline::{Player, PlayerOptions, MAX_SCHEDULED_DELAY, MAX_SPEED, MIN_SPEED};
pub use timer::{Timer, TimerHandle};
