//! In-memory surface.

use std::io;

use super::TerminalSurface;

/// A command received by a [`MemorySurface`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCommand {
    Write(String),
    Resize(u16, u16),
    Clear,
}

/// Surface that keeps everything in memory.
///
/// `contents` is the text written since the last clear; `commands` is the full
/// history, which makes it usable as a spy in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    contents: String,
    size: Option<(u16, u16)>,
    commands: Vec<SurfaceCommand>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text written since the last clear.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Current size, if a resize has been received.
    pub fn size(&self) -> Option<(u16, u16)> {
        self.size
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn clear_count(&self) -> usize {
        self.count(|c| matches!(c, SurfaceCommand::Clear))
    }

    pub fn write_count(&self) -> usize {
        self.count(|c| matches!(c, SurfaceCommand::Write(_)))
    }

    pub fn resize_count(&self) -> usize {
        self.count(|c| matches!(c, SurfaceCommand::Resize(..)))
    }

    /// Forget the command history, keeping contents and size.
    pub fn reset_history(&mut self) {
        self.commands.clear();
    }

    fn count(&self, pred: impl Fn(&SurfaceCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl TerminalSurface for MemorySurface {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.contents.push_str(text);
        self.commands.push(SurfaceCommand::Write(text.to_string()));
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.size = Some((width, height));
        self.commands.push(SurfaceCommand::Resize(width, height));
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.contents.clear();
        self.commands.push(SurfaceCommand::Clear);
        Ok(())
    }
}
