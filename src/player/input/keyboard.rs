//! Keyboard shortcuts for the interactive host.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::player::clock::Clock;
use crate::player::state::InputResult;
use crate::player::timeline::Player;
use crate::terminal::TerminalSurface;

/// Events skipped by `,`/`.` and the arrow keys
pub const EVENT_STEP: isize = 1;
/// Events skipped with Shift held
pub const EVENT_STEP_LARGE: isize = 10;
/// Recorded time skipped by `<`/`>`
pub const TIME_STEP_MS: f64 = 5000.0;

/// Apply one key press to the player.
pub fn handle_key_event<S: TerminalSurface, C: Clock>(
    key: KeyEvent,
    player: &mut Player<S, C>,
) -> InputResult {
    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        EVENT_STEP_LARGE
    } else {
        EVENT_STEP
    };

    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => return InputResult::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return InputResult::Quit
        }

        // === Playback controls ===
        KeyCode::Char(' ') => player.toggle(),
        KeyCode::Char('+') | KeyCode::Char('=') => player.speed_up(),
        KeyCode::Char('-') | KeyCode::Char('_') => player.speed_down(),

        // === Event stepping ===
        KeyCode::Char(',') | KeyCode::Left => player.seek_relative(-step),
        KeyCode::Char('.') | KeyCode::Right => player.seek_relative(step),

        // === Time seeking ===
        KeyCode::Char('<') => player.seek_time_relative(-TIME_STEP_MS),
        KeyCode::Char('>') => player.seek_time_relative(TIME_STEP_MS),
        KeyCode::Home => player.seek(0),
        KeyCode::End => player.seek(player.len()),

        // === Markers ===
        KeyCode::Char('m') => {
            if !player.next_marker() {
                tracing::debug!(position = player.position(), "no marker ahead");
            }
        }
        KeyCode::Char('M') => {
            player.prev_marker();
        }

        _ => {}
    }

    InputResult::Continue
}
