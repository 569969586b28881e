//! Info command handler

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use castplay::asciicast::{EventType, Session};
use castplay::Config;

/// Print header details and statistics for a recording.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, config: &Config) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let session = Session::parse_with(&raw, &config.parse_options())
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    print!("{}", format_info(&name, raw.len() as u64, &session));
    Ok(())
}

/// Render the info report.
pub fn format_info(name: &str, file_size: u64, session: &Session) -> String {
    let header = &session.header;
    let mut out = String::new();

    let count = |kind: EventType| session.events.iter().filter(|e| e.event_type == kind).count();

    let _ = writeln!(out, "File:       {} ({})", name, format_size(file_size));
    let _ = writeln!(out, "Format:     asciicast v{}", header.version);
    let _ = writeln!(out, "Terminal:   {}x{}", header.width, header.height);
    if let Some(title) = &header.title {
        let _ = writeln!(out, "Title:      {}", title);
    }
    if let Some(command) = &header.command {
        let _ = writeln!(out, "Command:    {}", command);
    }
    if let Some(recorded) = header.timestamp.and_then(format_timestamp) {
        let _ = writeln!(out, "Recorded:   {}", recorded);
    }
    let _ = writeln!(
        out,
        "Duration:   {}",
        format_duration(session.duration_ms() / 1000.0)
    );
    if let Some(limit) = header.idle_time_limit {
        let _ = writeln!(out, "Idle limit: {}s", limit);
    }
    let _ = writeln!(
        out,
        "Events:     {} ({} output, {} input, {} resize, {} markers)",
        session.len(),
        count(EventType::Output),
        count(EventType::Input),
        count(EventType::Resize),
        count(EventType::Marker),
    );
    for marker in session.markers() {
        let _ = writeln!(out, "  marker:   {}", marker.data);
    }
    if let Some(theme) = &header.theme {
        let _ = writeln!(out, "Theme:      {}", theme);
    }
    out
}

/// Format a duration in seconds, e.g. "1m 5s".
fn format_duration(seconds: f64) -> String {
    let total_secs = seconds.round() as u64;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

fn format_timestamp(unix_secs: u64) -> Option<String> {
    let secs = i64::try_from(unix_secs).ok()?;
    let time = chrono::DateTime::from_timestamp(secs, 0)?;
    Some(time.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}
