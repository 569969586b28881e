//! Marker collection and navigation.
//!
//! Markers are special events in the cast file that can be used
//! to navigate to specific points in the recording.

use crate::asciicast::Session;
use crate::player::state::MarkerPosition;

/// Collect markers from the session with their cumulative times.
///
/// # Arguments
/// * `session` - The parsed session
///
/// # Returns
/// A vector of `MarkerPosition` in event order
pub fn collect_markers(session: &Session) -> Vec<MarkerPosition> {
    let mut markers = Vec::new();
    let mut cumulative = 0.0f64;

    for (index, event) in session.events.iter().enumerate() {
        cumulative += event.delay_ms;
        if event.is_marker() {
            markers.push(MarkerPosition {
                index,
                time_ms: cumulative,
                label: event.data.clone(),
            });
        }
    }

    markers
}

/// First marker that has not been executed yet at `cursor`.
pub fn next_marker(markers: &[MarkerPosition], cursor: usize) -> Option<&MarkerPosition> {
    markers.iter().find(|m| m.index >= cursor)
}

/// Latest marker strictly before the one just executed at `cursor`.
///
/// Seeking to a marker leaves the cursor right after it, so this skips the
/// marker the cursor is sitting on and returns the one before.
pub fn prev_marker(markers: &[MarkerPosition], cursor: usize) -> Option<&MarkerPosition> {
    markers.iter().rev().find(|m| m.index + 1 < cursor)
}
