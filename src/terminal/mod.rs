//! Terminal surface the player renders into.
//!
//! The player only ever issues three commands: write raw text, resize the
//! grid, and clear the screen. Everything about glyphs, cursor movement and
//! escape sequence interpretation belongs to the surface implementation.
//!
//! - [`MemorySurface`]: keeps the written text and a log of every command
//! - [`StdoutSurface`]: forwards commands to a real terminal via crossterm

mod memory;
mod stdout;

use std::io;

pub use memory::{MemorySurface, SurfaceCommand};
pub use stdout::StdoutSurface;

/// A rendering target for replayed events.
pub trait TerminalSurface {
    /// Append raw text (may contain escape sequences) for rendering.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Change the terminal grid dimensions.
    fn resize(&mut self, width: u16, height: u16) -> io::Result<()>;

    /// Reset the visible buffer to empty.
    fn clear(&mut self) -> io::Result<()>;
}

impl<T: TerminalSurface + ?Sized> TerminalSurface for &mut T {
    fn write(&mut self, text: &str) -> io::Result<()> {
        (**self).write(text)
    }

    fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        (**self).resize(width, height)
    }

    fn clear(&mut self) -> io::Result<()> {
        (**self).clear()
    }
}

impl<T: TerminalSurface + ?Sized> TerminalSurface for Box<T> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        (**self).write(text)
    }

    fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        (**self).resize(width, height)
    }

    fn clear(&mut self) -> io::Result<()> {
        (**self).clear()
    }
}
