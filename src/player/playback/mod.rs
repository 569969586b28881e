//! Playback helpers for the player.
//!
//! This module handles marker collection and time/index mapping for seeking.

mod markers;
mod seeking;

pub use markers::{collect_markers, next_marker, prev_marker};
pub use seeking::{find_event_index_at_time, time_at_index};
