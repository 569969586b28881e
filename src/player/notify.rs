//! Player notifications.
//!
//! Observers subscribe and receive every [`PlayerEvent`] on their own channel.
//! Delivery is fire-and-forget; receivers that have been dropped are pruned
//! on the next send.

use std::sync::mpsc::{self, Receiver, Sender};

/// Category of a reported error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Recording could not be parsed; load aborted
    Format,
    /// Recording could not be fetched; load aborted
    Transport,
    /// One event had a bad payload and was skipped
    MalformedEvent,
    /// The terminal surface rejected a command
    Surface,
}

/// Something the player wants observers to know about.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// A session was installed
    Loaded {
        width: u16,
        height: u16,
        events: usize,
    },
    /// Playback began from the start of the session
    Started,
    /// Play/pause toggled
    Toggled { playing: bool },
    /// A marker event was executed during playback
    MarkerReached { index: usize, label: String },
    /// A seek finished; `index` is the new cursor
    SeekCompleted { index: usize },
    /// The cursor reached the end of the session
    Ended,
    Error { kind: ErrorKind, message: String },
}

/// Fan-out of player events to any number of subscribers.
#[derive(Debug, Default)]
pub struct Notifier {
    subscribers: Vec<Sender<PlayerEvent>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new observer.
    pub fn subscribe(&mut self) -> Receiver<PlayerEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn emit(&mut self, event: PlayerEvent) {
        tracing::trace!(?event, "notify");
        // A failed send means the receiver is gone
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub(crate) fn error(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.emit(PlayerEvent::Error {
            kind,
            message: message.into(),
        });
    }
}
