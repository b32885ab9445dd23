//! Display rendering

use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::source::SourceFile;
use crate::syntax::{ColorCategory, Palette, Style, Token, BACKGROUND, LINE_NUMBER};
use crate::terminal::Terminal;
use crate::viewport::Viewport;

/// Columns per tab stop
const TAB_WIDTH: usize = 4;

/// Display state
pub struct Display {
    /// Whether a full redraw is needed
    needs_redraw: bool,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Token colours
    palette: Palette,
}

impl Display {
    pub fn new(show_line_numbers: bool, palette: Palette) -> Self {
        Self {
            needs_redraw: true,
            show_line_numbers,
            palette,
        }
    }

    /// Mark that a full redraw is needed
    pub fn force_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Render the visible part of the source
    pub fn render(
        &mut self,
        terminal: &mut Terminal,
        source: &SourceFile,
        viewport: &Viewport,
    ) -> Result<()> {
        let cols = terminal.cols() as usize;
        let background = Style::default().with_bg(BACKGROUND);

        if self.needs_redraw {
            terminal.apply_style(&background)?;
            terminal.clear_screen()?;
        }

        let lnum_width = if self.show_line_numbers {
            line_number_width(source.line_count())
        } else {
            0
        };
        let text_cols = cols.saturating_sub(lnum_width);
        let top_line = viewport.top_line();

        for row in 0..viewport.height() {
            let line_idx = top_line + row;
            terminal.move_cursor(row as u16, 0)?;
            terminal.apply_style(&background)?;

            if let Some(line) = source.line(line_idx) {
                if self.show_line_numbers {
                    terminal.apply_style(&Style::fg(LINE_NUMBER))?;
                    terminal.write_str(&format_line_number(line_idx + 1, lnum_width))?;
                }

                if !line.text().is_empty() {
                    for (text, category) in layout_row(line.tokens(), text_cols) {
                        terminal.apply_style(&self.palette.style(category))?;
                        terminal.write_str(&text)?;
                    }
                }
            }

            terminal.clear_to_eol()?;
            terminal.reset_attributes()?;
        }

        let status_row = viewport.height() as u16;
        self.render_status_line(terminal, source, viewport, status_row, cols)?;

        terminal.flush()?;
        self.needs_redraw = false;
        Ok(())
    }

    /// Render the status line below the code
    fn render_status_line(
        &self,
        terminal: &mut Terminal,
        source: &SourceFile,
        viewport: &Viewport,
        row: u16,
        cols: usize,
    ) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        terminal.apply_style(&Style::reverse())?;
        let status = status_line(source.name(), viewport, cols);
        terminal.write_str(&status)?;
        terminal.reset_attributes()?;
        Ok(())
    }
}

/// Width of the line number gutter (including separator)
fn line_number_width(line_count: usize) -> usize {
    let digits = line_count.max(1).to_string().len();
    digits + 1
}

/// Right-aligned line number plus separator space
fn format_line_number(number: usize, width: usize) -> String {
    format!("{:>width$} ", number, width = width - 1)
}

/// Position indicator for the status line
fn position_label(viewport: &Viewport) -> String {
    let top = viewport.top_line();
    let max = viewport.max_offset() as usize;
    if max == 0 {
        "All".to_string()
    } else if top == 0 {
        "Top".to_string()
    } else if top >= max {
        "Bot".to_string()
    } else {
        format!("{}%", top * 100 / max)
    }
}

/// Build the status line text, padded or truncated to `cols`
fn status_line(name: &str, viewport: &Viewport, cols: usize) -> String {
    let line = format!(
        " {}  L{}/{}  {} ",
        printable(name),
        (viewport.top_line() + 1).min(viewport.content().max(1)),
        viewport.content(),
        position_label(viewport)
    );

    let width: usize = line.chars().map(|c| c.width().unwrap_or(1)).sum();
    if width < cols {
        format!("{}{}", line, " ".repeat(cols - width))
    } else {
        truncate_to_width(&line, cols)
    }
}

/// Clip a row of tokens to `max_cols` display columns
///
/// Tabs are expanded to the next tab stop. Returns the visible pieces
/// with the category each should be drawn in.
fn layout_row(tokens: &[Token], max_cols: usize) -> Vec<(String, ColorCategory)> {
    let mut pieces = Vec::new();
    let mut col = 0;

    'tokens: for token in tokens {
        let mut text = String::new();
        for ch in token.text.chars() {
            if ch == '\t' {
                let spaces = TAB_WIDTH - col % TAB_WIDTH;
                for _ in 0..spaces {
                    if col >= max_cols {
                        break;
                    }
                    text.push(' ');
                    col += 1;
                }
            } else if let Some(shown) = control_notation(ch) {
                let shown_width = shown.chars().count();
                if col + shown_width > max_cols {
                    if !text.is_empty() {
                        pieces.push((text, token.color));
                    }
                    break 'tokens;
                }
                text.push_str(&shown);
                col += shown_width;
            } else {
                let ch_width = ch.width().unwrap_or(0);
                if col + ch_width > max_cols {
                    if !text.is_empty() {
                        pieces.push((text, token.color));
                    }
                    break 'tokens;
                }
                text.push(ch);
                col += ch_width;
            }
        }
        if !text.is_empty() {
            pieces.push((text, token.color));
        }
        if col >= max_cols {
            break;
        }
    }

    pieces
}

/// Printable stand-in for a control character
///
/// C0 controls use caret notation (`^[` for ESC, `^M` for CR), DEL is
/// `^?` and C1 controls become U+FFFD. Tabs are expanded by the caller.
fn control_notation(ch: char) -> Option<String> {
    match ch {
        '\u{0}'..='\u{1f}' => Some(format!("^{}", char::from(ch as u8 + 0x40))),
        '\u{7f}' => Some("^?".to_string()),
        _ if ch.is_control() => Some(char::REPLACEMENT_CHARACTER.to_string()),
        _ => None,
    }
}

/// Replace control characters so text is safe to write to the terminal
fn printable(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for ch in s.chars() {
        match control_notation(ch) {
            Some(shown) => result.push_str(&shown),
            None => result.push(ch),
        }
    }
    result
}

/// Truncate a string to fit within a display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}
