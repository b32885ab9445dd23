//! Terminal abstraction using crossterm

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{self as cstyle, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::error::Result;
use crate::logging;
use crate::syntax::{Color, Style};

/// Terminal wrapper for cross-platform terminal I/O
pub struct Terminal {
    /// Terminal width in columns
    cols: u16,
    /// Terminal height in rows
    rows: u16,
}

impl Terminal {
    /// Create a new terminal instance and enter raw mode
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;

        let mut term = Self { cols, rows };
        term.enter_alternate_screen()?;
        term.hide_cursor()?;
        logging::hold();

        Ok(term)
    }

    /// Enter alternate screen buffer and start receiving mouse events
    fn enter_alternate_screen(&mut self) -> Result<()> {
        execute!(io::stdout(), terminal::EnterAlternateScreen, EnableMouseCapture)?;
        Ok(())
    }

    /// Leave alternate screen buffer
    fn leave_alternate_screen(&mut self) -> Result<()> {
        execute!(io::stdout(), DisableMouseCapture, terminal::LeaveAlternateScreen)?;
        Ok(())
    }

    /// Hide the cursor
    fn hide_cursor(&mut self) -> Result<()> {
        execute!(io::stdout(), cursor::Hide)?;
        Ok(())
    }

    /// Show the cursor
    fn show_cursor(&mut self) -> Result<()> {
        execute!(io::stdout(), cursor::Show)?;
        Ok(())
    }

    /// Get terminal width
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Get terminal height
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Record a new size (from a resize event)
    pub fn set_size(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Clear the entire screen
    pub fn clear_screen(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::All))?;
        Ok(())
    }

    /// Clear from cursor to end of line
    pub fn clear_to_eol(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(io::stdout(), cursor::MoveTo(col, row))?;
        Ok(())
    }

    /// Write a string at current cursor position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(io::stdout(), Print(s))?;
        Ok(())
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    /// Wait up to `timeout` for an event
    pub fn poll_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            let ev = event::read()?;
            if let Event::Resize(cols, rows) = ev {
                self.set_size(cols, rows);
            }
            Ok(Some(ev))
        } else {
            Ok(None)
        }
    }

    /// Set colours and attributes for subsequent output
    ///
    /// `Color::Default` leaves that layer unchanged.
    pub fn apply_style(&mut self, style: &Style) -> Result<()> {
        if style.is_default() {
            return Ok(());
        }
        let mut out = io::stdout();
        if style.fg != Color::Default {
            queue!(out, SetForegroundColor(to_crossterm(style.fg)))?;
        }
        if style.bg != Color::Default {
            queue!(out, SetBackgroundColor(to_crossterm(style.bg)))?;
        }
        if style.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if style.reverse {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }

    /// Reset all attributes
    pub fn reset_attributes(&mut self) -> Result<()> {
        queue!(io::stdout(), SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = self.reset_attributes();
        let _ = self.show_cursor();
        let _ = self.leave_alternate_screen();
        let _ = terminal::disable_raw_mode();
        let _ = logging::release();
    }
}

/// Map a palette colour onto crossterm's colour type
pub fn to_crossterm(color: Color) -> cstyle::Color {
    match color {
        Color::Default => cstyle::Color::Reset,
        Color::Black => cstyle::Color::Black,
        Color::Red => cstyle::Color::DarkRed,
        Color::Green => cstyle::Color::DarkGreen,
        Color::Yellow => cstyle::Color::DarkYellow,
        Color::Blue => cstyle::Color::DarkBlue,
        Color::Magenta => cstyle::Color::DarkMagenta,
        Color::Cyan => cstyle::Color::DarkCyan,
        Color::White => cstyle::Color::Grey,
        Color::BrightBlack => cstyle::Color::DarkGrey,
        Color::BrightRed => cstyle::Color::Red,
        Color::BrightGreen => cstyle::Color::Green,
        Color::BrightYellow => cstyle::Color::Yellow,
        Color::BrightBlue => cstyle::Color::Blue,
        Color::BrightMagenta => cstyle::Color::Magenta,
        Color::BrightCyan => cstyle::Color::Cyan,
        Color::BrightWhite => cstyle::Color::White,
        Color::Rgb(r, g, b) => cstyle::Color::Rgb { r, g, b },
    }
}
