//! The timeline player.
//!
//! Holds the loaded [`Session`] and a cursor: events `[0, cursor)` have been
//! executed against the surface, `cursor` is the next one to execute. While
//! playing, exactly one timer deadline is armed for the event at the cursor;
//! when it fires the event runs and the deadline for the following event is
//! chained from it.
//!
//! The player never sleeps. A host calls [`Player::tick`] whenever
//! [`Player::time_until_next`] has elapsed (see `player::native`).

use std::fmt;
use std::io;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crate::asciicast::{EventType, ParseOptions, Session};
use crate::terminal::TerminalSurface;
use crate::transport::Transport;

use super::clock::{Clock, SystemClock};
use super::error::{parse_resize, MalformedEventError, PlayerError};
use super::notify::{ErrorKind, Notifier, PlayerEvent};
use super::playback::{
    collect_markers, find_event_index_at_time, next_marker, prev_marker, time_at_index,
};
use super::state::{transition, Command, MarkerPosition, PlayerState};
use super::timer::Timer;

/// Slowest allowed playback speed
pub const MIN_SPEED: f64 = 0.1;
/// Fastest allowed playback speed
pub const MAX_SPEED: f64 = 16.0;
/// Longest wait ever scheduled between two events, whatever the recording says
pub const MAX_SCHEDULED_DELAY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Playback tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerOptions {
    /// Speed multiplier (1.0 = recorded timing)
    pub speed: f64,
    /// Upper bound for any single wait between events
    pub max_delay: Option<Duration>,
    /// Also cap waits at the header's `idle_time_limit`
    pub honor_idle_time_limit: bool,
    /// How recordings are normalized on load
    pub parse: ParseOptions,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            speed: 1.0,
            max_delay: None,
            honor_idle_time_limit: true,
            parse: ParseOptions::default(),
        }
    }
}

/// Replays a session against a terminal surface.
pub struct Player<S: TerminalSurface, C: Clock = SystemClock> {
    surface: S,
    clock: C,
    options: PlayerOptions,
    session: Option<Session>,
    markers: Vec<MarkerPosition>,
    index: usize,
    state: PlayerState,
    timer: Timer,
    notifier: Notifier,
    /// Last size successfully sent to the surface
    size: Option<(u16, u16)>,
}

impl<S: TerminalSurface> Player<S, SystemClock> {
    pub fn new(surface: S) -> Self {
        Self::with_clock(surface, SystemClock)
    }

    /// Play from the cursor to the end, sleeping between events.
    ///
    /// Returns immediately if nothing is loaded.
    pub fn play_to_end(&mut self) {
        self.play();
        while let Some(wait) = self.time_until_next() {
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
            self.tick();
        }
    }
}

impl<S: TerminalSurface, C: Clock> Player<S, C> {
    pub fn with_clock(surface: S, clock: C) -> Self {
        Self {
            surface,
            clock,
            options: PlayerOptions::default(),
            session: None,
            markers: Vec::new(),
            index: 0,
            state: PlayerState::Idle,
            timer: Timer::new(),
            notifier: Notifier::new(),
            size: None,
        }
    }

    pub fn with_options(mut self, options: PlayerOptions) -> Self {
        self.options = options;
        self.options.speed = clamp_speed(self.options.speed);
        self
    }

    /// Register an observer for player notifications.
    pub fn subscribe(&mut self) -> Receiver<PlayerEvent> {
        self.notifier.subscribe()
    }

    // === Accessors ===

    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Index of the next event to execute.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Number of events in the loaded session (0 when idle).
    pub fn len(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.events.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn markers(&self) -> &[MarkerPosition] {
        &self.markers
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn options(&self) -> &PlayerOptions {
        &self.options
    }

    pub fn speed(&self) -> f64 {
        self.options.speed
    }

    /// Recorded time (ms) at the cursor.
    pub fn current_time_ms(&self) -> f64 {
        self.session
            .as_ref()
            .map_or(0.0, |s| time_at_index(s, self.index))
    }

    /// True iff an event execution is currently scheduled.
    pub fn is_playing(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Time until the next scheduled event, `None` when nothing is scheduled.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.timer.remaining(self.clock.now())
    }

    // === Loading ===

    /// Parse `raw` and install it as the current session.
    ///
    /// Any pending event is cancelled first. On failure the previous session
    /// (if any) stays installed, paused at its cursor.
    pub fn load(&mut self, raw: &str) -> Result<(), PlayerError> {
        self.halt();

        match Session::parse_with(raw, &self.options.parse) {
            Ok(session) => {
                self.install(session);
                Ok(())
            }
            Err(e) => {
                self.report_load_failure(ErrorKind::Format, &e);
                Err(e.into())
            }
        }
    }

    /// Fetch a recording through `transport`, then [`load`](Self::load) it.
    pub fn load_from<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        location: &str,
    ) -> Result<(), PlayerError> {
        self.halt();

        let raw = match transport.fetch(location) {
            Ok(raw) => raw,
            Err(e) => {
                self.report_load_failure(ErrorKind::Transport, &e);
                return Err(e.into());
            }
        };
        self.load(&raw)
    }

    /// Install an already parsed session.
    pub fn load_session(&mut self, session: Session) {
        self.halt();
        self.install(session);
    }

    fn install(&mut self, session: Session) {
        let (width, height) = (session.header.width, session.header.height);
        let events = session.events.len();

        self.markers = collect_markers(&session);
        self.session = Some(session);
        self.index = 0;
        self.apply(Command::Load);
        self.resize_surface(width, height);

        tracing::debug!(width, height, events, "session loaded");
        self.notifier.emit(PlayerEvent::Loaded {
            width,
            height,
            events,
        });
    }

    fn report_load_failure(&mut self, kind: ErrorKind, err: &dyn fmt::Display) {
        tracing::warn!(error = %err, "failed to load recording");
        self.notifier.error(kind, err.to_string());
    }

    // === Play / pause ===

    /// Start or resume playback at the cursor.
    ///
    /// No-op when already playing or when nothing is loaded. At the end of
    /// the session this reports `Ended` without scheduling anything.
    pub fn play(&mut self) {
        if self.state == PlayerState::Playing || !self.apply(Command::Play) {
            return;
        }

        if self.index >= self.len() {
            self.finish();
            return;
        }

        if self.index == 0 {
            self.notifier.emit(PlayerEvent::Started);
        }
        self.notifier.emit(PlayerEvent::Toggled { playing: true });

        let now = self.clock.now();
        self.arm_from(now);
    }

    /// Stop the pending event. The cursor is kept; resuming waits the full
    /// delay of the pending event again.
    pub fn pause(&mut self) {
        self.halt();
    }

    pub fn toggle(&mut self) {
        if self.state == PlayerState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    fn halt(&mut self) {
        if let Some(handle) = self.timer.cancel() {
            tracing::trace!(?handle, index = self.index, "cancelled pending event");
        }
        if self.state == PlayerState::Playing {
            self.apply(Command::Pause);
            self.notifier.emit(PlayerEvent::Toggled { playing: false });
        }
    }

    fn finish(&mut self) {
        self.timer.cancel();
        if self.apply(Command::Finish) {
            tracing::debug!(events = self.len(), "reached end of session");
            self.notifier.emit(PlayerEvent::Ended);
        }
    }

    // === Seeking ===

    /// Move the cursor to `target` (clamped to the session length).
    ///
    /// Forward seeks execute the skipped events on top of the current screen.
    /// Any other seek clears the surface and replays from the first event,
    /// since the surface cannot undo output. Play/pause state is kept.
    pub fn seek(&mut self, target: usize) {
        let len = match &self.session {
            Some(session) => session.events.len(),
            None => {
                tracing::debug!(target, "seek ignored: no session loaded");
                return;
            }
        };

        let was_playing = self.state == PlayerState::Playing;
        self.timer.cancel();

        let target = target.min(len);
        if target > self.index {
            self.replay(self.index..target);
        } else {
            if let Err(e) = self.surface.clear() {
                report_surface_error(&mut self.notifier, "clear", &e);
            }
            self.restore_initial_size();
            self.replay(0..target);
        }
        self.index = target;

        tracing::debug!(index = target, "seek completed");
        self.notifier.emit(PlayerEvent::SeekCompleted { index: target });

        if was_playing {
            if self.index >= len {
                self.finish();
            } else {
                let now = self.clock.now();
                self.arm_from(now);
            }
        }
    }

    /// Seek by `delta` events from the cursor.
    pub fn seek_relative(&mut self, delta: isize) {
        self.seek(self.index.saturating_add_signed(delta));
    }

    /// Seek so that every event recorded at or before `time_ms` is executed.
    pub fn seek_to_time(&mut self, time_ms: f64) {
        if let Some(session) = &self.session {
            let target = find_event_index_at_time(session, time_ms);
            self.seek(target);
        }
    }

    /// Seek by `delta_ms` of recorded time from the cursor.
    pub fn seek_time_relative(&mut self, delta_ms: f64) {
        self.seek_to_time(self.current_time_ms() + delta_ms);
    }

    /// Seek to just after the next marker. Returns false if there is none.
    pub fn next_marker(&mut self) -> bool {
        match next_marker(&self.markers, self.index).map(|m| m.index + 1) {
            Some(target) => {
                self.seek(target);
                true
            }
            None => false,
        }
    }

    /// Seek to just after the previous marker, or to the start if there is
    /// none. Returns false in the latter case.
    pub fn prev_marker(&mut self) -> bool {
        match prev_marker(&self.markers, self.index).map(|m| m.index + 1) {
            Some(target) => {
                self.seek(target);
                true
            }
            None => {
                self.seek(0);
                false
            }
        }
    }

    fn replay(&mut self, range: std::ops::Range<usize>) {
        for index in range {
            self.execute_event(index);
        }
    }

    fn restore_initial_size(&mut self) {
        let initial = self
            .session
            .as_ref()
            .map(|s| (s.header.width, s.header.height));

        if let Some((width, height)) = initial {
            if self.size != Some((width, height)) {
                self.resize_surface(width, height);
            }
        }
    }

    // === Speed ===

    /// Set the speed multiplier, clamped to [`MIN_SPEED`, `MAX_SPEED`].
    ///
    /// Applies from the next scheduled event; a pending wait is not rescaled.
    pub fn set_speed(&mut self, speed: f64) {
        self.options.speed = clamp_speed(speed);
    }

    pub fn speed_up(&mut self) {
        self.set_speed(self.options.speed * 1.5);
    }

    pub fn speed_down(&mut self) {
        self.set_speed(self.options.speed / 1.5);
    }

    // === Scheduling ===

    /// Execute every event whose deadline has passed. Returns how many ran.
    pub fn tick(&mut self) -> usize {
        let mut executed = 0;
        while let Some(deadline) = self.timer.fire_if_due(self.clock.now()) {
            self.fire(deadline);
            executed += 1;
        }
        executed
    }

    fn fire(&mut self, deadline: Instant) {
        let index = self.index;
        self.execute_event(index);
        self.index += 1;

        if let Some(label) = self.marker_label(index) {
            self.notifier
                .emit(PlayerEvent::MarkerReached { index, label });
        }

        if self.index >= self.len() {
            self.finish();
        } else {
            self.arm_from(deadline);
        }
    }

    fn arm_from(&mut self, base: Instant) {
        let delay = self.scheduled_delay(self.index);
        // Out of Instant range: fire now rather than panic.
        let deadline = base.checked_add(delay).unwrap_or(base);
        let handle = self.timer.arm(deadline);
        tracing::trace!(?handle, index = self.index, ?delay, "armed");
    }

    /// Real-time wait before the event at `index`, after speed and caps.
    fn scheduled_delay(&self, index: usize) -> Duration {
        let Some(session) = &self.session else {
            return Duration::ZERO;
        };
        let Some(event) = session.events.get(index) else {
            return Duration::ZERO;
        };

        let mut delay_ms = event.delay_ms.max(0.0) / self.options.speed;

        if let Some(max) = self.options.max_delay {
            delay_ms = delay_ms.min(max.as_secs_f64() * 1000.0);
        }
        if self.options.honor_idle_time_limit {
            if let Some(limit) = session.header.idle_time_limit.filter(|l| *l > 0.0) {
                delay_ms = delay_ms.min(limit * 1000.0);
            }
        }

        Duration::try_from_secs_f64(delay_ms / 1000.0)
            .unwrap_or(Duration::MAX)
            .min(MAX_SCHEDULED_DELAY)
    }

    fn marker_label(&self, index: usize) -> Option<String> {
        let event = self.session.as_ref()?.events.get(index)?;
        event.is_marker().then(|| event.data.clone())
    }

    // === Event execution ===

    /// Apply one event's side effect to the surface.
    ///
    /// Never fails: a malformed payload or a surface error is logged and
    /// reported, and the caller moves on to the next event.
    fn execute_event(&mut self, index: usize) {
        let Some(event) = self.session.as_ref().and_then(|s| s.events.get(index)) else {
            return;
        };

        match event.event_type {
            EventType::Output | EventType::Input => {
                if let Err(e) = self.surface.write(&event.data) {
                    report_surface_error(&mut self.notifier, "write", &e);
                }
            }
            EventType::Resize => match parse_resize(&event.data) {
                Some((width, height)) => match self.surface.resize(width, height) {
                    Ok(()) => self.size = Some((width, height)),
                    Err(e) => report_surface_error(&mut self.notifier, "resize", &e),
                },
                None => {
                    let err = MalformedEventError::Resize {
                        index,
                        data: event.data.clone(),
                    };
                    tracing::warn!(index, data = %event.data, "skipping malformed resize event");
                    self.notifier
                        .error(ErrorKind::MalformedEvent, err.to_string());
                }
            },
            other => {
                tracing::debug!(index, code = %other.code(), "event has no terminal effect");
            }
        }
    }

    fn resize_surface(&mut self, width: u16, height: u16) {
        match self.surface.resize(width, height) {
            Ok(()) => self.size = Some((width, height)),
            Err(e) => report_surface_error(&mut self.notifier, "resize", &e),
        }
    }

    /// Apply a lifecycle command; rejected commands are logged and ignored.
    fn apply(&mut self, command: Command) -> bool {
        match transition(self.state, command) {
            Ok(next) => {
                self.state = next;
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "ignoring player command");
                false
            }
        }
    }
}

fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        1.0
    } else {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    }
}

fn report_surface_error(notifier: &mut Notifier, command: &str, err: &io::Error) {
    tracing::warn!(command, error = %err, "terminal surface command failed");
    notifier.error(ErrorKind::Surface, format!("{} failed: {}", command, err));
}
