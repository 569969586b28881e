// Derived from asciinema (https://github.com/asciinema/asciinema)
// Copyright (c) asciinema authors
// Licensed under GPL-3.0-or-later
// Vendored by castplay project

//! asciicast v3 decoding.
//!
//! Event times are already deltas in seconds; they only need scaling.

use std::collections::HashMap;

use serde::Deserialize;

use super::{
    delay_ms_from_secs, parse_event_line, Event, FormatError, Header, Line, Theme, Version,
};

#[derive(Deserialize)]
struct V3Header {
    term: V3Term,
    timestamp: Option<u64>,
    idle_time_limit: Option<f64>,
    command: Option<String>,
    title: Option<String>,
    env: Option<HashMap<String, String>>,
}

#[derive(Deserialize)]
struct V3Term {
    cols: u16,
    rows: u16,
    theme: Option<serde_json::Value>,
}

impl From<V3Header> for Header {
    fn from(raw: V3Header) -> Self {
        Header {
            version: Version::Three,
            width: raw.term.cols,
            height: raw.term.rows,
            title: raw.title,
            idle_time_limit: raw.idle_time_limit,
            theme: raw.term.theme.and_then(Theme::from_value),
            timestamp: raw.timestamp,
            command: raw.command,
            env: raw.env,
        }
    }
}

pub(super) fn decode(
    header: serde_json::Value,
    header_line: usize,
    lines: &[Line<'_>],
) -> Result<(Header, Vec<Event>), FormatError> {
    let header: V3Header =
        serde_json::from_value(header).map_err(|source| FormatError::InvalidHeader {
            line: header_line,
            source,
        })?;

    let events = lines
        .iter()
        .map(|line| {
            let raw = parse_event_line(line)?;
            Ok(Event::new(
                delay_ms_from_secs(raw.time, line.number),
                raw.event_type,
                raw.data,
            ))
        })
        .collect::<Result<Vec<_>, FormatError>>()?;

    Ok((header.into(), events))
}
