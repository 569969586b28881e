//! asciicast v2 decoding.
//!
//! Event times are absolute seconds since the start of the recording and are
//! converted to the relative millisecond model here.

use std::collections::HashMap;

use serde::Deserialize;

use super::{
    delay_ms_from_secs, parse_event_line, Event, FormatError, Header, Line, Theme, Version,
};

#[derive(Deserialize)]
struct V2Header {
    width: u16,
    height: u16,
    timestamp: Option<u64>,
    idle_time_limit: Option<f64>,
    command: Option<String>,
    title: Option<String>,
    env: Option<HashMap<String, Option<String>>>,
    theme: Option<serde_json::Value>,
}

impl From<V2Header> for Header {
    fn from(raw: V2Header) -> Self {
        Header {
            version: Version::Two,
            width: raw.width,
            height: raw.height,
            title: raw.title,
            idle_time_limit: raw.idle_time_limit,
            theme: raw.theme.and_then(Theme::from_value),
            timestamp: raw.timestamp,
            command: raw.command,
            env: raw.env.map(|env| {
                env.into_iter()
                    .filter_map(|(k, v)| v.map(|v| (k, v)))
                    .collect()
            }),
        }
    }
}

pub(super) fn decode(
    header: serde_json::Value,
    header_line: usize,
    lines: &[Line<'_>],
) -> Result<(Header, Vec<Event>), FormatError> {
    let header: V2Header =
        serde_json::from_value(header).map_err(|source| FormatError::InvalidHeader {
            line: header_line,
            source,
        })?;

    let mut events = Vec::with_capacity(lines.len());
    let mut time_offset = 0.0;

    for line in lines {
        let raw = parse_event_line(line)?;
        let delay_ms = delay_ms_from_secs(raw.time - time_offset, line.number);
        events.push(Event::new(delay_ms, raw.event_type, raw.data));
        time_offset = raw.time;
    }

    Ok((header.into(), events))
}
