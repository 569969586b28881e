//! Build tasks for castplay
//!
//! `cargo run -p xtask -- man` writes `castplay.1` (and one page per
//! subcommand); `cargo run -p xtask -- completions` writes completion scripts
//! for every supported shell.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use castplay::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask")]
struct Args {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages
    Man {
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    match Args::parse().task {
        Task::Man { out_dir } => generate_man(&out_dir),
        Task::Completions { out_dir } => generate_completions(&out_dir),
    }
}

fn generate_man(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let cmd = Cli::command();
    write_man_page(&cmd, out_dir, "castplay")?;

    for sub in cmd.get_subcommands() {
        write_man_page(sub, out_dir, &format!("castplay-{}", sub.get_name()))?;
    }

    println!("Man pages written to {}", out_dir.display());
    Ok(())
}

fn write_man_page(cmd: &clap::Command, out_dir: &Path, name: &str) -> Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;

    let path = out_dir.join(format!("{}.1", name));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))
}

fn generate_completions(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut cmd = Cli::command();
    for shell in Shell::value_variants() {
        let path = clap_complete::generate_to(*shell, &mut cmd, "castplay", out_dir)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}
