//! Command-line interface definition.
//!
//! Lives in the library so that `xtask` can render man pages and shell
//! completions from the same definition the binary parses.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Version string, with the commit hash on dev builds.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ")"
);

#[cfg(feature = "release")]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(
    name = "castplay",
    version = VERSION,
    about = "Replay asciicast terminal recordings",
    long_about = "Replay asciicast v2/v3 terminal recordings with their original timing.\n\n\
                  While playing: space pauses, arrows and ,/. step events (Shift: x10), \
                  </> skip 5 seconds, m/M jump between markers, +/- change speed, q quits."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play a recording in this terminal
    Play {
        /// Path to the .cast file
        file: PathBuf,

        /// Playback speed multiplier (0.1 - 16)
        #[arg(short, long)]
        speed: Option<f64>,

        /// Longest pause between two events, in seconds
        #[arg(long, value_name = "SECS")]
        max_delay: Option<f64>,

        /// Keep every output event as recorded instead of merging bursts
        #[arg(long)]
        no_coalesce: bool,
    },

    /// Show header details and statistics for a recording
    Info {
        /// Path to the .cast file
        file: PathBuf,
    },

    /// Print the raw terminal output of a recording up to an event
    Dump {
        /// Path to the .cast file
        file: PathBuf,

        /// Stop before this event index (default: all events)
        #[arg(long, value_name = "INDEX")]
        at: Option<usize>,
    },

    /// Inspect or create the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file location
    Path,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}
