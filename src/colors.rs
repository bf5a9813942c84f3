//! Color constants for the console screen.
//!
//! Rgb565 is native to the ST7789 and needs no conversion when written to the
//! display, so every color here is an `Rgb565`.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Screen background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Dump text.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure green. Header and info log entries.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow. Warning log entries.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors
// =============================================================================

/// Active input indicator.
/// RGB565: (31, 32, 0)
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Dark gray for debug entries and the header divider.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);
