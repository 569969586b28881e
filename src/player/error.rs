//! Player errors.

use crate::asciicast::FormatError;
use crate::transport::TransportError;

/// Errors that abort a load.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// A single event whose payload does not match its type.
///
/// Recoverable: the event's side effect is skipped and playback continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedEventError {
    #[error("Event {index}: resize payload {data:?} is not WIDTHxHEIGHT")]
    Resize { index: usize, data: String },
}

/// Parse a `WxH` resize payload into non-zero dimensions.
pub fn parse_resize(data: &str) -> Option<(u16, u16)> {
    let (width, height) = data.trim().split_once('x')?;
    let width: u16 = width.trim().parse().ok()?;
    let height: u16 = height.trim().parse().ok()?;

    if width == 0 || height == 0 {
        return None;
    }
    Some((width, height))
}
