//! Shell completion generation

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use castplay::cli::Cli;

pub fn handle(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
