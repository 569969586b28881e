//! User configuration.
//!
//! Stored as TOML at `<config dir>/castplay/config.toml`, or wherever
//! `CASTPLAY_CONFIG` points. Every field has a default, so a partial (or
//! missing) file is valid.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::asciicast::ParseOptions;
use crate::player::PlayerOptions;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "CASTPLAY_CONFIG";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub log: LogConfig,
}

/// Playback defaults; CLI flags override these per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Speed multiplier
    pub speed: f64,
    /// Longest wait between two events, in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_delay: Option<f64>,
    /// Cap waits at the recording's own `idle_time_limit`
    pub honor_idle_time_limit: bool,
    /// Output events closer than this (ms) are merged on load; 0 disables
    pub coalesce_threshold_ms: f64,
    /// Ask the host terminal to follow recorded resizes
    pub resize_host_terminal: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            max_delay: None,
            honor_idle_time_limit: true,
            coalesce_threshold_ms: crate::asciicast::OUTPUT_COALESCE_THRESHOLD_MS,
            resize_host_terminal: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `CASTPLAY_LOG` is unset
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults if it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Write the config file, creating its directory if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }

    pub fn config_path() -> Result<PathBuf> {
        resolve_config_path(std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    pub fn parse_options(&self) -> ParseOptions {
        let threshold = self.playback.coalesce_threshold_ms;
        ParseOptions {
            coalesce_threshold_ms: (threshold > 0.0).then_some(threshold),
        }
    }

    pub fn player_options(&self) -> PlayerOptions {
        PlayerOptions {
            speed: self.playback.speed,
            max_delay: self
                .playback
                .max_delay
                .filter(|secs| secs.is_finite() && *secs > 0.0)
                .map(|secs| Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)),
            honor_idle_time_limit: self.playback.honor_idle_time_limit,
            parse: self.parse_options(),
        }
    }
}

fn resolve_config_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = override_path.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path);
    }
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("castplay").join("config.toml"))
}
