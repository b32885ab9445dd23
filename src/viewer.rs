//! Viewer state and main loop

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::Config;
use crate::display::Display;
use crate::error::Result;
use crate::input::{self, Action};
use crate::source::SourceFile;
use crate::terminal::Terminal;
use crate::viewport::Viewport;

/// Poll interval while a scroll animation is running
const FRAME: Duration = Duration::from_millis(16);

/// Poll interval while idle
const IDLE: Duration = Duration::from_millis(500);

/// Main viewer state
pub struct Viewer {
    /// The highlighted file being shown
    source: SourceFile,
    /// Terminal interface
    terminal: Terminal,
    /// Display state
    display: Display,
    /// Visible region and scroll animation
    viewport: Viewport,
    /// Rows per mouse wheel notch
    scroll_step: usize,
    /// Whether viewer is running
    running: bool,
}

impl Viewer {
    /// Create a viewer for a loaded source
    pub fn new(terminal: Terminal, source: SourceFile, config: &Config) -> Self {
        // Leave 1 row for the status line
        let height = text_rows(terminal.rows());
        let viewport = Viewport::new(
            height,
            source.line_count(),
            Duration::from_millis(config.scroll_duration_ms),
        );

        Self {
            source,
            terminal,
            display: Display::new(config.show_line_numbers, config.palette.clone()),
            viewport,
            scroll_step: config.scroll_step,
            running: true,
        }
    }

    /// Run the viewer until the user quits
    pub fn run(&mut self) -> Result<()> {
        debug!(path = %self.source.path().display(), "viewer started");
        self.display.force_redraw();
        self.render()?;

        while self.running {
            let timeout = if self.viewport.is_scrolling() { FRAME } else { IDLE };

            if let Some(event) = self.terminal.poll_event(timeout)? {
                if let Some(action) = input::translate_event(&event) {
                    self.handle_action(action, Instant::now());
                    if !self.running {
                        break;
                    }
                    self.render()?;
                }
            }

            if self.viewport.tick(Instant::now()) {
                self.render()?;
            }
        }

        debug!("viewer stopped");
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        self.display
            .render(&mut self.terminal, &self.source, &self.viewport)
    }

    /// Apply an action to the viewer state
    fn handle_action(&mut self, action: Action, now: Instant) {
        let page = self.viewport.height().saturating_sub(1).max(1) as f64;

        match action {
            Action::Quit => self.running = false,
            Action::ScrollLines(n) => self.viewport.scroll_by(n as f64, now),
            Action::ScrollPages(n) => self.viewport.scroll_by(n as f64 * page, now),
            Action::Wheel(n) => self
                .viewport
                .scroll_by((n as f64) * self.scroll_step as f64, now),
            Action::Top => self.viewport.jump_to(0.0),
            Action::Bottom => self.viewport.jump_to(self.viewport.max_offset()),
            Action::Resize => {
                debug!(
                    cols = self.terminal.cols(),
                    rows = self.terminal.rows(),
                    "terminal resized"
                );
                self.viewport.set_height(text_rows(self.terminal.rows()));
                self.display.force_redraw();
            }
        }
    }
}

/// Rows available for code, leaving one for the status line
fn text_rows(rows: u16) -> usize {
    rows.saturating_sub(1) as usize
}
