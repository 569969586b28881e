//! Play command handler

use std::path::Path;

use anyhow::{bail, Result};

use castplay::player::{play_session, PlaybackResult};
use castplay::Config;

/// Play a recording, with CLI flags layered over the config file.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    file: &Path,
    speed: Option<f64>,
    max_delay: Option<f64>,
    no_coalesce: bool,
    mut config: Config,
) -> Result<()> {
    apply_overrides(&mut config, speed, max_delay, no_coalesce)?;

    match play_session(file, &config)? {
        PlaybackResult::Finished => tracing::debug!("playback finished"),
        PlaybackResult::Interrupted => println!("\r\nStopped."),
    }
    Ok(())
}

fn apply_overrides(
    config: &mut Config,
    speed: Option<f64>,
    max_delay: Option<f64>,
    no_coalesce: bool,
) -> Result<()> {
    if let Some(speed) = speed {
        if !speed.is_finite() || speed <= 0.0 {
            bail!("--speed must be a positive number, got {}", speed);
        }
        config.playback.speed = speed;
    }
    if let Some(secs) = max_delay {
        if !secs.is_finite() || secs <= 0.0 {
            bail!("--max-delay must be a positive number of seconds, got {}", secs);
        }
        config.playback.max_delay = Some(secs);
    }
    if no_coalesce {
        config.playback.coalesce_threshold_ms = 0.0;
    }
    Ok(())
}
