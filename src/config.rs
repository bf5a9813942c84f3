//! Compile-time configuration for the inputs, the dumper and the console.
//!
//! Everything here is a `const`. The firmware has no runtime configuration
//! store; changing a value means rebuilding.

// =============================================================================
// Input Debounce Configuration
// =============================================================================

/// Period of the debounce tick in milliseconds.
///
/// Debounce lengths below are expressed in ticks of this period.
pub const TICK_MS: u64 = 1;

/// Ticks input 1 must stay constant after a change before it settles (50 ms).
pub const INPUT1_DEBOUNCE_TICKS: u8 = 50;

/// Ticks input 2 must stay constant after a change before it settles (50 ms).
pub const INPUT2_DEBOUNCE_TICKS: u8 = 50;

/// Per-channel debounce lengths, in ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceConfig {
    /// Debounce length for input 1.
    pub input1_ticks: u8,
    /// Debounce length for input 2.
    pub input2_ticks: u8,
}

impl DebounceConfig {
    /// Create a configuration with the given lengths.
    ///
    /// A length of zero is raised to one tick so a change always settles.
    /// This differs from the AVR firmware, where a zero length arms a
    /// countdown of zero and the change is never reported.
    pub const fn new(
        input1_ticks: u8,
        input2_ticks: u8,
    ) -> Self {
        Self {
            input1_ticks: clamp_ticks(input1_ticks),
            input2_ticks: clamp_ticks(input2_ticks),
        }
    }
}

impl Default for DebounceConfig {
    fn default() -> Self { Self::new(INPUT1_DEBOUNCE_TICKS, INPUT2_DEBOUNCE_TICKS) }
}

/// Smallest usable debounce length.
pub(crate) const fn clamp_ticks(ticks: u8) -> u8 { if ticks == 0 { 1 } else { ticks } }

// =============================================================================
// Hex Dump Layout
// =============================================================================

/// Bytes per dump row.
pub const DUMP_COLUMNS: u16 = 16;

/// Line terminator emitted by the dumper.
pub const LINE_BREAK: &str = "\r\n";

/// Separator between a row address and its bytes.
pub const ADDRESS_SEPARATOR: &str = ": ";

/// Blank placeholder for an unused column on the first row (one byte cell wide).
pub const COLUMN_PLACEHOLDER: &str = "   ";

/// Bytes dumped per RAM dump request (8 rows).
pub const RAM_DUMP_LENGTH: u16 = 128;

/// Bytes dumped per EEPROM dump request (8 rows).
pub const EEPROM_DUMP_LENGTH: u16 = 128;

/// Characters in one full dump row: "AAAA: " followed by 16 "HH " cells.
pub const DUMP_ROW_CHARS: usize = 6 + DUMP_COLUMNS as usize * 3;

// =============================================================================
// Display and Console Layout
// =============================================================================

/// Display width in pixels (ST7789 on Pimoroni PIM715: 320x240)
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 240;

/// Header bar height in pixels.
pub const HEADER_HEIGHT: u32 = 16;

/// Console glyph width in pixels (FONT_6X10).
pub const CONSOLE_CHAR_WIDTH: u32 = 6;

/// Console line pitch in pixels.
pub const CONSOLE_LINE_HEIGHT: u32 = 11;

/// Characters per console line. A full dump row fits, trailing space included.
pub const CONSOLE_COLUMNS: usize = DUMP_ROW_CHARS;

/// Console lines kept (and shown) below the header.
pub const CONSOLE_ROWS: usize = 16;

// =============================================================================
// Persistent Storage Window
// =============================================================================

/// Flash size of the Pico 2 board.
pub const FLASH_SIZE: usize = 4 * 1024 * 1024;

/// Size of the flash window exposed as EEPROM.
pub const EEPROM_SIZE: u32 = 4096;

/// Offset of the EEPROM window from the start of flash (the last 4 KiB sector).
pub const EEPROM_FLASH_OFFSET: u32 = FLASH_SIZE as u32 - EEPROM_SIZE;
