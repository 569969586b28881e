//! Player state management
//!
//! The play/pause lifecycle is an explicit enum driven by a pure
//! [`transition`] function. Cursor and timer bookkeeping live in the player;
//! this module only decides which lifecycle moves are legal.

/// Lifecycle state of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    /// No session loaded
    #[default]
    Idle,
    /// Session loaded, no event scheduled
    Paused,
    /// Session loaded, next event scheduled
    Playing,
}

/// A request to move between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A session was installed
    Load,
    Play,
    Pause,
    /// The cursor reached the end of the session while playing
    Finish,
}

/// A command that is not allowed in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {command:?} while {state:?}")]
pub struct InvalidTransition {
    pub state: PlayerState,
    pub command: Command,
}

/// Compute the state that follows `command` in `state`.
///
/// | state   | Load   | Play    | Pause  | Finish |
/// |---------|--------|---------|--------|--------|
/// | Idle    | Paused | error   | Idle   | error  |
/// | Paused  | Paused | Playing | Paused | error  |
/// | Playing | Paused | Playing | Paused | Paused |
pub fn transition(state: PlayerState, command: Command) -> Result<PlayerState, InvalidTransition> {
    use Command::*;
    use PlayerState::*;

    match (state, command) {
        (_, Load) => Ok(Paused),
        (Paused | Playing, Play) => Ok(Playing),
        (Idle, Pause) => Ok(Idle),
        (Paused | Playing, Pause) => Ok(Paused),
        (Playing, Finish) => Ok(Paused),
        (state, command) => Err(InvalidTransition { state, command }),
    }
}

/// Result of processing a key press in the interactive host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    /// Stop playback and leave the player
    Quit,
}

/// Marker information for navigation and progress display.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPosition {
    /// Index of the marker event in the session
    pub index: usize,
    /// Cumulative time (ms) when the marker occurs
    pub time_ms: f64,
    /// Marker label (from the cast file)
    pub label: String,
}
