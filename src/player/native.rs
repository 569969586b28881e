//! Host driver: plays a recording on the real terminal.
//!
//! On a TTY the loop waits on crossterm input with the time left until the
//! next deadline as the poll timeout, then lets the player fire whatever is
//! due. Without a TTY it simply sleeps from deadline to deadline.

use std::io;
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::config::Config;
use crate::terminal::StdoutSurface;
use crate::transport::FileTransport;

use super::input::handle_key_event;
use super::notify::PlayerEvent;
use super::state::InputResult;
use super::timeline::Player;

/// Poll timeout while nothing is scheduled (paused).
const IDLE_POLL: Duration = Duration::from_millis(250);

/// How a playback session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackResult {
    /// Played through to the last event
    Finished,
    /// The user quit before the end
    Interrupted,
}

/// Play the recording at `path` on stdout.
pub fn play_session(path: &Path, config: &Config) -> Result<PlaybackResult> {
    let surface =
        StdoutSurface::stdout().with_resize_host(config.playback.resize_host_terminal);
    let mut player = Player::new(surface).with_options(config.player_options());

    player
        .load_from(&FileTransport::new(), &path.to_string_lossy())
        .with_context(|| format!("Failed to load {}", path.display()))?;

    if atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout) {
        play_interactive(&mut player)
    } else {
        tracing::debug!("no TTY, playing without controls");
        player.play_to_end();
        Ok(PlaybackResult::Finished)
    }
}

#[cfg(not(tarpaulin_include))]
fn play_interactive(player: &mut Player<StdoutSurface<io::Stdout>>) -> Result<PlaybackResult> {
    let notifications = player.subscribe();
    let _raw = RawModeGuard::enable().context("Failed to enable raw mode")?;

    player.play();

    loop {
        if has_ended(&notifications) {
            return Ok(PlaybackResult::Finished);
        }

        let timeout = player.time_until_next().unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && handle_key_event(key, player) == InputResult::Quit
                {
                    return Ok(PlaybackResult::Interrupted);
                }
            }
        }

        player.tick();
    }
}

/// Drain pending notifications, reporting whether playback ended.
fn has_ended(notifications: &Receiver<PlayerEvent>) -> bool {
    notifications
        .try_iter()
        .fold(false, |ended, event| ended || event == PlayerEvent::Ended)
}

/// Keeps the terminal in raw mode for its lifetime.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "failed to restore terminal mode");
        }
    }
}
