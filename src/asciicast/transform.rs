//! Event stream transforms applied after decoding.

use super::Event;

/// Default threshold below which consecutive output events are merged.
pub const OUTPUT_COALESCE_THRESHOLD_MS: f64 = 20.0;

/// An in-place rewrite of a decoded event sequence.
pub trait Transform {
    fn transform(&mut self, events: &mut Vec<Event>);
}

/// Merges output events that follow another output event almost immediately.
///
/// **Algorithm**:
/// 1. Walk the events in order, keeping a list of retained events
/// 2. An output event whose delay is below the threshold, and whose preceding
///    *retained* event is also output, is appended onto that event
/// 3. The merged event's delay is dropped, not carried into the next event
/// 4. Any other event type breaks the chain and is kept as is
///
/// Rendered text order is preserved exactly; sub-threshold timing is not.
#[derive(Debug, Clone)]
pub struct CoalesceOutput {
    threshold_ms: f64,
    merged_count: usize,
}

impl CoalesceOutput {
    pub fn new(threshold_ms: f64) -> Self {
        Self {
            threshold_ms,
            merged_count: 0,
        }
    }

    /// Number of events folded into their predecessor so far.
    pub fn merged_count(&self) -> usize {
        self.merged_count
    }
}

impl Default for CoalesceOutput {
    fn default() -> Self {
        Self::new(OUTPUT_COALESCE_THRESHOLD_MS)
    }
}

impl Transform for CoalesceOutput {
    fn transform(&mut self, events: &mut Vec<Event>) {
        let mut retained: Vec<Event> = Vec::with_capacity(events.len());

        for event in events.drain(..) {
            if event.is_output() && event.delay_ms < self.threshold_ms {
                if let Some(prev) = retained.last_mut().filter(|prev| prev.is_output()) {
                    prev.data.push_str(&event.data);
                    self.merged_count += 1;
                    continue;
                }
            }
            retained.push(event);
        }

        *events = retained;
    }
}
