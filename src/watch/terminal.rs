use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};

/// Raw mode, alternate screen and hidden cursor for as long as it lives.
/// Dropping it restores all three, including on early return or panic.
pub(crate) struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    pub(crate) fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self { out })
    }

    /// Terminal height in rows, if known
    pub(crate) fn rows(&self) -> Option<u16> {
        crossterm::terminal::size().ok().map(|(_, rows)| rows)
    }

    /// Replace the whole screen with `text` (lines joined by "\r\n")
    pub(crate) fn draw_screen(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All), Print(text))?;
        self.out.flush()
    }

    /// Overwrite one row in place
    pub(crate) fn draw_row(&mut self, row: u16, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(0, row),
            Clear(ClearType::CurrentLine),
            Print(text)
        )?;
        self.out.flush()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        tracing::debug!("terminal restored");
    }
}
