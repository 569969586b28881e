//! Fetching raw recording text.
//!
//! The player never reads files itself; it asks a [`Transport`] for the text
//! behind a location. [`FileTransport`] covers local files, and
//! [`MemoryTransport`] serves fixed contents (embedding hosts, tests).

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while fetching a recording.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Recording not found: {location}")]
    NotFound { location: String },

    #[error("Failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("Recording {location} is not valid UTF-8")]
    InvalidUtf8 { location: String },
}

/// Source of raw recording text.
pub trait Transport {
    fn fetch(&self, location: &str) -> Result<String, TransportError>;
}

/// Reads recordings from the local filesystem.
///
/// Relative locations are resolved against the base directory, if one is set.
#[derive(Debug, Clone, Default)]
pub struct FileTransport {
    base_dir: Option<PathBuf>,
}

impl FileTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Transport for FileTransport {
    fn fetch(&self, location: &str) -> Result<String, TransportError> {
        let path = self.resolve(location);
        tracing::debug!(path = %path.display(), "fetching recording");

        let bytes = fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => TransportError::NotFound {
                location: location.to_string(),
            },
            _ => TransportError::Io {
                location: location.to_string(),
                source,
            },
        })?;

        String::from_utf8(bytes).map_err(|_| TransportError::InvalidUtf8 {
            location: location.to_string(),
        })
    }
}

/// Serves recordings from an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    entries: HashMap<String, String>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, location: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(location, contents);
        self
    }

    pub fn insert(&mut self, location: impl Into<String>, contents: impl Into<String>) {
        self.entries.insert(location.into(), contents.into());
    }
}

impl Transport for MemoryTransport {
    fn fetch(&self, location: &str) -> Result<String, TransportError> {
        self.entries
            .get(location)
            .cloned()
            .ok_or_else(|| TransportError::NotFound {
                location: location.to_string(),
            })
    }
}
