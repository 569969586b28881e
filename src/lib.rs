//! castplay - asciicast parsing and timeline playback
//!
//! - [`asciicast`]: parse v2/v3 recordings into a normalized [`Session`]
//! - [`player`]: replay a session against a [`TerminalSurface`] with
//!   play, pause and seek
//! - [`terminal`] / [`transport`]: the surface and fetch seams, with in-memory
//!   and stdout/file implementations
//!
//! ```
//! use castplay::player::{ManualClock, Player};
//! use castplay::terminal::MemorySurface;
//!
//! let cast = "{\"version\": 2, \"width\": 80, \"height\": 24}\n[0.5, \"o\", \"hello\"]\n";
//! let mut player = Player::with_clock(MemorySurface::new(), ManualClock::new());
//! player.load(cast).unwrap();
//! player.seek(1);
//! assert_eq!(player.surface().contents(), "hello");
//! ```

pub mod asciicast;
pub mod cli;
pub mod config;
pub mod logging;
pub mod player;
pub mod terminal;
pub mod transport;

pub use asciicast::{parse, Event, EventType, FormatError, Header, ParseOptions, Session};
pub use config::Config;
pub use player::{Player, PlayerError, PlayerEvent, PlayerOptions, PlayerState};
pub use terminal::{MemorySurface, TerminalSurface};
pub use transport::{FileTransport, MemoryTransport, Transport, TransportError};
