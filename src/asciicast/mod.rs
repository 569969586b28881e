//! asciicast v2/v3 parser
//!
//! Reference: https://docs.asciinema.org/manual/asciicast/v2/ and
//! https://docs.asciinema.org/manual/asciicast/v3/
//!
//! Both on-disk encodings are decoded into one canonical [`Session`]: a
//! [`Header`] plus events whose `delay_ms` is the time since the previous
//! event, in milliseconds. v2 stores absolute timestamps and is converted by
//! subtracting the previous event's time; v3 already stores deltas.
//!
//! The header's `version` selects the decoder; there is no parser trait,
//! just a match on [`Version`] that returns the common types.

mod error;
mod theme;
mod transform;
mod v2;
mod v3;

use std::collections::HashMap;
use std::time::Duration;

pub use error::FormatError;
pub use theme::Theme;
pub use transform::{CoalesceOutput, Transform, OUTPUT_COALESCE_THRESHOLD_MS};

/// asciicast format version
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Version {
    /// Absolute event timestamps
    Two,
    /// Relative event timestamps, `#` comment lines allowed
    Three,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Version::Two => write!(f, "2"),
            Version::Three => write!(f, "3"),
        }
    }
}

/// Recording header, normalized across versions.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub version: Version,
    pub width: u16,
    pub height: u16,
    pub title: Option<String>,
    /// Seconds, as recorded
    pub idle_time_limit: Option<f64>,
    pub theme: Option<Theme>,
    /// Unix timestamp of the recording start
    pub timestamp: Option<u64>,
    pub command: Option<String>,
    pub env: Option<HashMap<String, String>>,
}

impl Header {
    /// A bare header with the given dimensions and no metadata.
    pub fn new(version: Version, width: u16, height: u16) -> Self {
        Self {
            version,
            width,
            height,
            title: None,
            idle_time_limit: None,
            theme: None,
            timestamp: None,
            command: None,
            env: None,
        }
    }
}

/// Event type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// Output (data written to terminal)
    Output, // "o"
    /// Input (data read from terminal)
    Input, // "i"
    /// Resize (terminal resize, data is "WxH")
    Resize, // "r"
    /// Marker (annotation)
    Marker, // "m"
    /// Quit
    Quit, // "q"
    /// Exit (process exit code)
    Exit, // "x"
    /// Any other single-character code, carried through uninterpreted
    Other(char),
}

impl EventType {
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        Some(match c {
            'o' => EventType::Output,
            'i' => EventType::Input,
            'r' => EventType::Resize,
            'm' => EventType::Marker,
            'q' => EventType::Quit,
            'x' => EventType::Exit,
            other => EventType::Other(other),
        })
    }

    pub fn code(&self) -> char {
        match self {
            EventType::Output => 'o',
            EventType::Input => 'i',
            EventType::Resize => 'r',
            EventType::Marker => 'm',
            EventType::Quit => 'q',
            EventType::Exit => 'x',
            EventType::Other(c) => *c,
        }
    }
}

/// A normalized event
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Delay since the previous event (in milliseconds, never negative)
    pub delay_ms: f64,
    /// Event type
    pub event_type: EventType,
    /// Event data (output text, "WxH" for resize, marker label, ...)
    pub data: String,
}

impl Event {
    pub fn new(delay_ms: f64, event_type: EventType, data: impl Into<String>) -> Self {
        Self {
            delay_ms,
            event_type,
            data: data.into(),
        }
    }

    pub fn output(delay_ms: f64, data: impl Into<String>) -> Self {
        Self::new(delay_ms, EventType::Output, data)
    }

    pub fn input(delay_ms: f64, data: impl Into<String>) -> Self {
        Self::new(delay_ms, EventType::Input, data)
    }

    pub fn resize(delay_ms: f64, size: impl Into<String>) -> Self {
        Self::new(delay_ms, EventType::Resize, size)
    }

    pub fn marker(delay_ms: f64, label: impl Into<String>) -> Self {
        Self::new(delay_ms, EventType::Marker, label)
    }

    pub fn is_output(&self) -> bool {
        self.event_type == EventType::Output
    }

    pub fn is_marker(&self) -> bool {
        self.event_type == EventType::Marker
    }

    /// The delay as a `Duration`.
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_ms.max(0.0) / 1000.0).unwrap_or(Duration::MAX)
    }
}

/// Options controlling normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Merge output events closer than this many milliseconds; `None` disables.
    pub coalesce_threshold_ms: Option<f64>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            coalesce_threshold_ms: Some(OUTPUT_COALESCE_THRESHOLD_MS),
        }
    }
}

impl ParseOptions {
    /// Keep every decoded event as is.
    pub fn uncoalesced() -> Self {
        Self {
            coalesce_threshold_ms: None,
        }
    }
}

/// A parsed recording: header plus the ordered, normalized event sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub header: Header,
    pub events: Vec<Event>,
}

/// Parse a recording with default options (coalescing enabled).
pub fn parse(raw: &str) -> Result<Session, FormatError> {
    Session::parse(raw)
}

impl Session {
    pub fn new(header: Header, events: Vec<Event>) -> Self {
        Self { header, events }
    }

    /// Parse a recording with default options.
    pub fn parse(raw: &str) -> Result<Self, FormatError> {
        Self::parse_with(raw, &ParseOptions::default())
    }

    /// Parse a recording from its full text.
    pub fn parse_with(raw: &str, options: &ParseOptions) -> Result<Self, FormatError> {
        let lines = significant_lines(raw);
        let (header_line, event_lines) = lines.split_first().ok_or(FormatError::Empty)?;

        let header_json: serde_json::Value =
            serde_json::from_str(header_line.text).map_err(|source| {
                FormatError::InvalidHeader {
                    line: header_line.number,
                    source,
                }
            })?;

        let (header, mut events) = match detect_version(&header_json, header_line.number)? {
            Version::Two => v2::decode(header_json, header_line.number, event_lines)?,
            Version::Three => v3::decode(header_json, header_line.number, event_lines)?,
        };

        let decoded = events.len();
        if let Some(threshold) = options.coalesce_threshold_ms {
            CoalesceOutput::new(threshold).transform(&mut events);
        }

        tracing::debug!(
            version = %header.version,
            width = header.width,
            height = header.height,
            decoded,
            retained = events.len(),
            "parsed recording"
        );

        Ok(Session { header, events })
    }

    /// Get all marker events
    pub fn markers(&self) -> Vec<&Event> {
        self.events.iter().filter(|e| e.is_marker()).collect()
    }

    /// Get all output events
    pub fn outputs(&self) -> Vec<&Event> {
        self.events.iter().filter(|e| e.is_output()).collect()
    }

    /// Calculate cumulative time (ms since start) for each event
    pub fn cumulative_times(&self) -> Vec<f64> {
        let mut times = Vec::with_capacity(self.events.len());
        let mut cumulative = 0.0;
        for event in &self.events {
            cumulative += event.delay_ms;
            times.push(cumulative);
        }
        times
    }

    /// Total recorded duration in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.events.iter().map(|e| e.delay_ms).sum()
    }

    /// Number of events recorded at or before `time_ms`.
    pub fn index_at_time(&self, time_ms: f64) -> usize {
        let mut cumulative = 0.0;
        for (i, event) in self.events.iter().enumerate() {
            cumulative += event.delay_ms;
            if cumulative > time_ms {
                return i;
            }
        }
        self.events.len()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// A non-blank, non-comment input line with its 1-based line number.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

fn significant_lines(raw: &str) -> Vec<Line<'_>> {
    raw.lines()
        .enumerate()
        .filter_map(|(i, text)| {
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                None
            } else {
                Some(Line {
                    number: i + 1,
                    text: trimmed,
                })
            }
        })
        .collect()
}

fn detect_version(header: &serde_json::Value, line: usize) -> Result<Version, FormatError> {
    let version = header
        .get("version")
        .ok_or(FormatError::MissingVersion { line })?;

    // `2` and `2.0` are the same JSON number.
    match version.as_f64() {
        Some(v) if v == 2.0 => Ok(Version::Two),
        Some(v) if v == 3.0 => Ok(Version::Three),
        _ => Err(FormatError::UnsupportedVersion(version.to_string())),
    }
}

/// Fields of an event line, before time normalization.
pub(crate) struct RawEvent {
    /// Seconds, absolute (v2) or relative (v3)
    pub time: f64,
    pub event_type: EventType,
    pub data: String,
}

/// Parse a `[time, code, data]` event line.
pub(crate) fn parse_event_line(line: &Line<'_>) -> Result<RawEvent, FormatError> {
    let value: serde_json::Value = serde_json::from_str(line.text)
        .map_err(|e| FormatError::invalid_event(line.number, e.to_string()))?;

    let arr = value
        .as_array()
        .ok_or_else(|| FormatError::invalid_event(line.number, "event must be a JSON array"))?;

    if arr.len() < 3 {
        return Err(FormatError::invalid_event(
            line.number,
            "event array must have at least 3 elements",
        ));
    }

    let time = arr[0]
        .as_f64()
        .ok_or_else(|| FormatError::invalid_event(line.number, "event time must be a number"))?;

    let code = arr[1]
        .as_str()
        .ok_or_else(|| FormatError::invalid_event(line.number, "event type must be a string"))?;

    let event_type = EventType::from_code(code).ok_or_else(|| {
        FormatError::invalid_event(line.number, format!("invalid event type: {:?}", code))
    })?;

    // Exit codes and other auxiliary payloads may be numbers; keep their JSON text
    let data = match &arr[2] {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Ok(RawEvent {
        time,
        event_type,
        data,
    })
}

/// Convert a non-negative delta in seconds to milliseconds.
///
/// Negative deltas (clock skew in v2, corrupt v3 lines) are clamped to zero.
pub(crate) fn delay_ms_from_secs(delta_secs: f64, line: usize) -> f64 {
    if delta_secs < 0.0 {
        tracing::warn!(line, delta_secs, "negative event delay clamped to zero");
        0.0
    } else {
        delta_secs * 1000.0
    }
}
