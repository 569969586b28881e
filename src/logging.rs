//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with replayed output on stdout.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "CASTPLAY_LOG";

/// Install the global subscriber.
///
/// `CASTPLAY_LOG` wins over `default_filter` (usually the config's
/// `log.level`). Calling this twice is harmless.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = build_filter(std::env::var(LOG_ENV).ok().as_deref(), default_filter);

    match fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        Ok(()) => Ok(()),
        Err(err)
            if err
                .to_string()
                .contains("attempted to set a global default subscriber more than once") =>
        {
            Ok(())
        }
        Err(err) => Err(anyhow!(err)),
    }
}

fn build_filter(from_env: Option<&str>, default_filter: &str) -> EnvFilter {
    from_env
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .or_else(|| EnvFilter::try_new(default_filter).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
