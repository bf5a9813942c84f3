//! On-screen debug console.
//!
//! [`ConsoleBuffer`] keeps the last [`CONSOLE_ROWS`] lines written to it and
//! implements [`core::fmt::Write`], so the hex dumper (through
//! [`FmtSink`](crate::dump::FmtSink)) and `write!` can both target it.
//! [`draw_console`] renders the lines with the 6x10 monospace font.
//!
//! # Line handling
//!
//! - `'\n'` ends the current line
//! - `'\r'` is dropped (the dumper emits `"\r\n"` for the UART)
//! - lines longer than [`CONSOLE_COLUMNS`] wrap
//! - when full, the oldest line is dropped

use core::fmt;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::{Deque, String};

use crate::config::{CONSOLE_COLUMNS, CONSOLE_LINE_HEIGHT, CONSOLE_ROWS};

/// One console line.
pub type ConsoleLine = String<CONSOLE_COLUMNS>;

/// Ring buffer of console lines.
pub struct ConsoleBuffer {
    lines: Deque<ConsoleLine, CONSOLE_ROWS>,
    /// Whether the last line is still being written.
    open: bool,
}

impl ConsoleBuffer {
    /// Create an empty console.
    pub const fn new() -> Self {
        Self {
            lines: Deque::new(),
            open: false,
        }
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.open = false;
    }

    /// Iterate over lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.lines.iter().map(|line| line.as_str()) }

    /// Number of lines held, including a partially written one.
    #[inline]
    pub fn len(&self) -> usize { self.lines.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    /// Start a new, empty line, dropping the oldest if full.
    fn begin_line(&mut self) {
        if self.lines.is_full() {
            self.lines.pop_front();
        }
        // Cannot fail: a slot was just freed
        self.lines.push_back(String::new()).ok();
        self.open = true;
    }

    fn push_char(
        &mut self,
        c: char,
    ) {
        match c {
            '\r' => {}
            '\n' => {
                if !self.open {
                    self.begin_line();
                }
                self.open = false;
            }
            _ => {
                if !self.open {
                    self.begin_line();
                }
                let wrapped = match self.lines.back_mut() {
                    Some(line) => line.push(c).is_err(),
                    None => true,
                };
                if wrapped {
                    self.begin_line();
                    if let Some(line) = self.lines.back_mut() {
                        line.push(c).ok();
                    }
                }
            }
        }
    }
}

impl Default for ConsoleBuffer {
    fn default() -> Self { Self::new() }
}

impl fmt::Write for ConsoleBuffer {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        s.chars().for_each(|c| self.push_char(c));
        Ok(())
    }
}

/// Draw the console lines top to bottom starting at `origin` (top-left).
pub fn draw_console<D>(
    display: &mut D,
    console: &ConsoleBuffer,
    origin: Point,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let style = MonoTextStyle::new(&FONT_6X10, color);
    let mut y = origin.y;

    for line in console.iter() {
        Text::with_baseline(line, Point::new(origin.x, y), style, Baseline::Top)
            .draw(display)
            .ok();
        y += CONSOLE_LINE_HEIGHT as i32;
    }
}

// =============================================================================
// Tests
// =============================================================================
