//! Integration tests for the castplay CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixtures_dir, temp_fixture};

/// A castplay command isolated from the user's config file.
fn castplay(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("castplay").expect("binary built");
    cmd.env("CASTPLAY_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("CASTPLAY_LOG");
    cmd
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let config = TempDir::new().unwrap();
    castplay(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("dump"));
}

#[test]
fn version_starts_with_package_version() {
    let config = TempDir::new().unwrap();
    castplay(&config)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "castplay {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn play_without_file_is_usage_error() {
    let config = TempDir::new().unwrap();
    castplay(&config)
        .arg("play")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<FILE>"));
}

// ============================================================================
// info / dump / play
// ============================================================================

#[test]
fn info_shows_header_and_counts() {
    let config = TempDir::new().unwrap();
    castplay(&config)
        .arg("info")
        .arg(fixtures_dir().join("with_markers.cast"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Format:     asciicast v3"))
        .stdout(predicate::str::contains("Terminal:   80x24"))
        .stdout(predicate::str::contains("Duration:   6s"))
        .stdout(predicate::str::contains("2 markers"))
        .stdout(predicate::str::contains("marker:   tests done"));
}

#[test]
fn info_on_missing_file_fails() {
    let config = TempDir::new().unwrap();
    castplay(&config)
        .args(["info", "/nonexistent/missing.cast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.cast"));
}

#[test]
fn info_on_unsupported_version_fails() {
    let config = TempDir::new().unwrap();
    castplay(&config)
        .arg("info")
        .arg(fixtures_dir().join("unsupported.cast"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported asciicast version"));
}

#[test]
fn dump_prints_replayed_output() {
    let config = TempDir::new().unwrap();
    let output = castplay(&config)
        .arg("dump")
        .arg(fixtures_dir().join("bad_resize.cast"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    insta::assert_snapshot!(stdout, @"before after");
}

#[test]
fn dump_stops_before_index() {
    let config = TempDir::new().unwrap();
    castplay(&config)
        .arg("dump")
        .arg(fixtures_dir().join("bad_resize.cast"))
        .args(["--at", "1"])
        .assert()
        .success()
        .stdout("before ");
}

#[test]
fn play_without_tty_runs_to_the_end() {
    let config = TempDir::new().unwrap();
    let (_dir, path) = temp_fixture("bad_resize.cast");

    castplay(&config)
        .arg("play")
        .arg(&path)
        .args(["--speed", "16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("before after"));
}

#[test]
fn play_rejects_zero_speed() {
    let config = TempDir::new().unwrap();
    castplay(&config)
        .arg("play")
        .arg(fixtures_dir().join("empty.cast"))
        .args(["--speed", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--speed"));
}

#[test]
fn play_missing_file_fails() {
    let config = TempDir::new().unwrap();
    castplay(&config)
        .args(["play", "/nonexistent/missing.cast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Recording not found"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn config_path_honors_override() {
    let config = TempDir::new().unwrap();
    castplay(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_init_then_show() {
    let config = TempDir::new().unwrap();
    castplay(&config)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    assert!(config.path().join("config.toml").exists());

    castplay(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[playback]"))
        .stdout(predicate::str::contains("speed = 1.0"));
}

#[test]
fn config_init_does_not_overwrite_without_force() {
    let config = TempDir::new().unwrap();
    let path = config.path().join("config.toml");
    std::fs::write(&path, "[playback]\nspeed = 2.0\n").unwrap();

    castplay(&config)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes made"));
    assert!(std::fs::read_to_string(&path).unwrap().contains("2.0"));

    castplay(&config)
        .args(["config", "init", "--force"])
        .assert()
        .success();
    assert!(std::fs::read_to_string(&path).unwrap().contains("1.0"));
}

#[test]
fn broken_config_is_reported() {
    let config = TempDir::new().unwrap();
    std::fs::write(config.path().join("config.toml"), "[playback\n").unwrap();

    castplay(&config)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn completions_for_bash() {
    let config = TempDir::new().unwrap();
    castplay(&config)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("castplay"));
}
