//! Viewport - the visible slice of the source, with smooth scrolling

use std::time::{Duration, Instant};

/// In-flight scroll animation
#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    /// When the animation started
    start_time: Instant,
    /// Offset at start
    start_pos: f64,
    /// Rows to travel (signed)
    distance: f64,
}

/// A window onto the source lines
#[derive(Debug)]
pub struct Viewport {
    /// First visible row, fractional while animating
    offset: f64,
    /// Number of text rows on screen (excluding the status line)
    height: usize,
    /// Total number of rows of content
    content: usize,
    /// Length of one scroll animation
    duration: Duration,
    /// Current animation, if any
    animation: Option<ScrollAnimation>,
}

/// Ease-out curve: fast start, slow finish
///
/// `ratio` is the elapsed fraction of the animation; values past 1 are
/// clamped so the curve ends exactly at 1.
pub fn ease_out(ratio: f64) -> f64 {
    let ratio = ratio.clamp(0.0, 1.0);
    1.0 - (1.0 - ratio) * (1.0 - ratio)
}

impl Viewport {
    /// Create a viewport at the top of the content
    pub fn new(height: usize, content: usize, duration: Duration) -> Self {
        Self {
            offset: 0.0,
            height,
            content,
            duration,
            animation: None,
        }
    }

    /// Largest valid offset
    pub fn max_offset(&self) -> f64 {
        self.content.saturating_sub(self.height) as f64
    }

    /// Get the top visible line
    pub fn top_line(&self) -> usize {
        self.offset.round() as usize
    }

    /// Get viewport height in rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the content size in rows
    pub fn content(&self) -> usize {
        self.content
    }

    /// Check if an animation is running
    pub fn is_scrolling(&self) -> bool {
        self.animation.is_some()
    }

    /// Update height after a resize, keeping the offset in range
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    /// Start (or extend) a smooth scroll by `delta` rows
    pub fn scroll_by(&mut self, delta: f64, now: Instant) {
        let target = match self.animation {
            Some(anim) => anim.start_pos + anim.distance + delta,
            None => self.offset + delta,
        };
        let target = target.clamp(0.0, self.max_offset());
        self.animation = Some(ScrollAnimation {
            start_time: now,
            start_pos: self.offset,
            distance: target - self.offset,
        });
    }

    /// Jump to a row without animating
    pub fn jump_to(&mut self, row: f64) {
        self.animation = None;
        self.offset = row.clamp(0.0, self.max_offset());
    }

    /// Advance the animation to `now`
    ///
    /// Returns true if the visible position changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let anim = match self.animation {
            Some(anim) => anim,
            None => return false,
        };

        let ratio = if self.duration.is_zero() {
            1.0
        } else {
            now.saturating_duration_since(anim.start_time).as_secs_f64()
                / self.duration.as_secs_f64()
        };

        let new_pos = (anim.start_pos + ease_out(ratio) * anim.distance)
            .clamp(0.0, self.max_offset());

        let before = self.top_line();
        if ratio >= 1.0 || new_pos == self.offset {
            self.animation = None;
        }
        self.offset = new_pos;
        before != self.top_line()
    }
}
