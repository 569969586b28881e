//! Recording parse errors.

/// Errors that can occur while parsing an asciicast recording.
///
/// Any of these aborts the parse: a partially decoded session is never returned.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Recording is empty (no header line)")]
    Empty,

    #[error("Invalid header on line {line}: {source}")]
    InvalidHeader {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Header on line {line} has no version field")]
    MissingVersion { line: usize },

    #[error("Unsupported asciicast version '{0}' (supported: 2, 3)")]
    UnsupportedVersion(String),

    #[error("Invalid event on line {line}: {reason}")]
    InvalidEvent { line: usize, reason: String },
}

impl FormatError {
    pub(crate) fn invalid_event(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidEvent {
            line,
            reason: reason.into(),
        }
    }
}
