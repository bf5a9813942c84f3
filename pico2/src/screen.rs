//! Console screen.
//!
//! # Layout
//!
//! ```text
//! CONSOLE                    I1:OFF I2:ON   (header)
//! RAM 0000                                  (console lines)
//!
//! 0000: 00 20 08 20 ...
//! ...
//! [I] 01234 I2 ON                           (recent log entries)
//! ```

use core::fmt::Write;

use console_inputs::colors::{BLACK, GRAY, GREEN, ORANGE, WHITE};
use console_inputs::config::{CONSOLE_LINE_HEIGHT, CONSOLE_ROWS, HEADER_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH};
use console_inputs::console::draw_console;
use console_inputs::{ConsoleBuffer, Input};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::String;
use profont::PROFONT_12_POINT;

use crate::log_buffer::LOG_BUFFER;

/// Log entries shown under the console.
const LOG_LINES: usize = 4;

/// Top of the log area.
const LOG_TOP: i32 = (HEADER_HEIGHT + CONSOLE_ROWS as u32 * CONSOLE_LINE_HEIGHT) as i32;

/// Redraw the whole screen.
pub fn draw_screen<D>(
    display: &mut D,
    console: &ConsoleBuffer,
    levels: [bool; 2],
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BLACK).ok();
    draw_header(display, levels);
    draw_console(display, console, Point::new(0, HEADER_HEIGHT as i32 + 2), WHITE);
    draw_log(display);
}

fn draw_header<D>(
    display: &mut D,
    levels: [bool; 2],
) where
    D: DrawTarget<Color = Rgb565>,
{
    let title_style = MonoTextStyle::new(&PROFONT_12_POINT, GREEN);
    Text::with_baseline("CONSOLE", Point::new(4, 1), title_style, Baseline::Top)
        .draw(display)
        .ok();

    // Input states, right aligned; active inputs highlighted
    let right = TextStyleBuilder::new()
        .alignment(Alignment::Right)
        .baseline(Baseline::Top)
        .build();
    let mut x = SCREEN_WIDTH as i32 - 4;
    for input in Input::ALL.iter().rev() {
        let active = levels[*input as usize];
        let mut label: String<8> = String::new();
        let _ = write!(label, "{}:{}", input.label(), if active { "ON" } else { "OFF" });

        let color = if active { ORANGE } else { GRAY };
        Text::with_text_style(&label, Point::new(x, 3), MonoTextStyle::new(&FONT_6X10, color), right)
            .draw(display)
            .ok();
        x -= 7 * 6;
    }

    Line::new(
        Point::new(0, HEADER_HEIGHT as i32 - 1),
        Point::new(SCREEN_WIDTH as i32 - 1, HEADER_HEIGHT as i32 - 1),
    )
    .into_styled(PrimitiveStyle::with_stroke(GRAY, 1))
    .draw(display)
    .ok();
}

/// Most recent log entries, oldest on top.
fn draw_log<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    let Ok(buffer) = LOG_BUFFER.try_lock() else {
        return;
    };

    let skip = buffer.len().saturating_sub(LOG_LINES);
    let mut y = LOG_TOP + 2;
    for entry in buffer.iter().skip(skip) {
        if y + CONSOLE_LINE_HEIGHT as i32 > SCREEN_HEIGHT as i32 {
            break;
        }

        // Format: [L] TTTTT message
        let mut prefix: String<16> = String::new();
        let _ = write!(prefix, "[{}] {:05}", entry.level.prefix(), entry.timestamp_ms % 100_000);

        let level_style = MonoTextStyle::new(&FONT_6X10, entry.level.color());
        Text::with_baseline(&prefix, Point::new(4, y), level_style, Baseline::Top)
            .draw(display)
            .ok();

        // Prefix is 11 chars at 6px
        let msg_style = MonoTextStyle::new(&FONT_6X10, WHITE);
        Text::with_baseline(entry.message.as_str(), Point::new(4 + 12 * 6, y), msg_style, Baseline::Top)
            .draw(display)
            .ok();

        y += CONSOLE_LINE_HEIGHT as i32;
    }
}
