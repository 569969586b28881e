//! Dump command handler

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use castplay::player::{Player, PlayerOptions};
use castplay::terminal::MemorySurface;

/// Print the raw output a terminal would have received up to `at`.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, at: Option<usize>, options: PlayerOptions) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let text = render(&raw, at, options)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Replay events `[0, at)` (all events when `at` is `None`) into memory.
pub fn render(raw: &str, at: Option<usize>, options: PlayerOptions) -> Result<String> {
    let mut player = Player::new(MemorySurface::new()).with_options(options);
    player.load(raw)?;
    let target = at.unwrap_or_else(|| player.len());
    player.seek(target);
    Ok(player.surface().contents().to_string())
}
