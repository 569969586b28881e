//! Config subcommands handler

use anyhow::Result;
use std::io::{self, BufRead, Write};

use castplay::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    print!("{}", toml_str);
    Ok(())
}

/// Print where the configuration file lives (whether or not it exists).
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Write a default configuration file.
///
/// An existing file is only replaced with `--force` or after confirmation.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(force: bool) -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists()
        && !force
        && !prompt_confirmation(&format!(
            "{} exists. Overwrite with defaults?",
            config_path.display()
        ))?
    {
        println!("No changes made.");
        return Ok(());
    }

    Config::default().save_to(&config_path)?;
    println!("Wrote {}", config_path.display());
    Ok(())
}

/// Prompt user for yes/no confirmation.
///
/// Returns true if user confirms (y/yes), false otherwise.
/// If stdin is not a TTY (non-interactive), returns false.
fn prompt_confirmation(message: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        println!("Non-interactive mode: use --force to overwrite");
        return Ok(false);
    }

    print!("{} [y/N] ", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    let response = input.trim().to_lowercase();
    response == "y" || response == "yes"
}
