//! Surface backed by a real terminal (or any writer).

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType, SetSize};

use super::TerminalSurface;

/// Writes replayed output straight to a writer, usually stdout.
///
/// Resizing only records the new size unless `resize_host` is enabled, in
/// which case the host terminal is asked to change its dimensions.
pub struct StdoutSurface<W: Write> {
    out: W,
    size: (u16, u16),
    resize_host: bool,
}

impl StdoutSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> StdoutSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            size: (80, 24),
            resize_host: false,
        }
    }

    /// Also resize the host terminal on resize commands.
    pub fn with_resize_host(mut self, enabled: bool) -> Self {
        self.resize_host = enabled;
        self
    }

    /// Size of the recorded terminal as last requested.
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TerminalSurface for StdoutSurface<W> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.size = (width, height);
        if self.resize_host {
            queue!(self.out, SetSize(width, height))?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()
    }
}
