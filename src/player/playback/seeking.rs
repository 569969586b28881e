//! Mapping between playback time and event indices.

use crate::asciicast::Session;

/// Number of events whose cumulative time is at or before `time_ms`.
///
/// This is the cursor that a seek to `time_ms` should land on: every event
/// that "has happened" by then is executed, nothing later.
pub fn find_event_index_at_time(session: &Session, time_ms: f64) -> usize {
    session.index_at_time(time_ms)
}

/// Cumulative time (ms) at which the event before `index` fired.
pub fn time_at_index(session: &Session, index: usize) -> f64 {
    session
        .events
        .iter()
        .take(index)
        .map(|e| e.delay_ms)
        .sum()
}
