//! Single-shot timer driven by the host.
//!
//! At most one deadline is pending at a time. Arming replaces any pending
//! deadline and cancelling clears it, so once cancelled a deadline can never
//! fire: there is no callback in flight, only state the host polls.

use std::time::{Duration, Instant};

/// Identifies one arming of the timer (for diagnostics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy)]
struct Pending {
    handle: TimerHandle,
    deadline: Instant,
}

#[derive(Debug, Default)]
pub struct Timer {
    pending: Option<Pending>,
    armed_total: u64,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to fire at `deadline`, replacing any pending deadline.
    pub fn arm(&mut self, deadline: Instant) -> TimerHandle {
        if let Some(previous) = self.pending {
            tracing::trace!(handle = previous.handle.0, "replacing pending timer");
        }
        self.armed_total += 1;
        let handle = TimerHandle(self.armed_total);
        self.pending = Some(Pending { handle, deadline });
        handle
    }

    /// Cancel the pending deadline, if any.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.pending.take().map(|p| p.handle)
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    /// Time left until the deadline, zero if already due.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Disarm and return the deadline if it has been reached.
    pub fn fire_if_due(&mut self, now: Instant) -> Option<Instant> {
        match self.pending {
            Some(p) if p.deadline <= now => {
                self.pending = None;
                Some(p.deadline)
            }
            _ => None,
        }
    }

    /// How many times the timer has been armed.
    pub fn armed_total(&self) -> u64 {
        self.armed_total
    }
}
