//! castplay - replay asciicast terminal recordings

mod commands;

use anyhow::Result;
use clap::Parser;

use castplay::cli::{Cli, Commands, ConfigCommands};
use castplay::{logging, Config};

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        // A broken file must not block writing a fresh one
        Err(_) if matches!(cli.command, Commands::Config(ConfigCommands::Init { .. })) => {
            Config::default()
        }
        Err(e) => return Err(e),
    };
    logging::init(&config.log.level)?;

    match cli.command {
        Commands::Play {
            file,
            speed,
            max_delay,
            no_coalesce,
        } => commands::play::handle(&file, speed, max_delay, no_coalesce, config),
        Commands::Info { file } => commands::info::handle(&file, &config),
        Commands::Dump { file, at } => commands::dump::handle(&file, at, config.player_options()),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&config),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init { force } => commands::config::handle_init(force),
        },
        Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(())
        }
    }
}
