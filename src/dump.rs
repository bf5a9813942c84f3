//! Hex memory dumper for the debug console.
//!
//! Renders a byte range as rows of 16 bytes, each row prefixed with its
//! address:
//!
//! ```text
//! 0103:          41 42 43 44 45 46 47 48 49 4A 4B 4C 4D
//! 0110: 4E 4F 50 51
//! ```
//!
//! The first row is padded with blank cells so every byte sits in the column
//! of its address's low nibble. An aligned start emits a line break and a
//! fresh header before its first byte instead. Addresses are 16 bits wide and
//! wrap.
//!
//! The layout algorithm ([`dump_range`]) is written once and parameterized
//! over a [`ByteSource`], so RAM and persistent storage share it and only the
//! byte fetch differs.

use core::fmt::{self, Write};

use crate::config::{ADDRESS_SEPARATOR, COLUMN_PLACEHOLDER, DUMP_COLUMNS, LINE_BREAK};

/// Value returned for addresses outside a [`SliceSource`] (erased EEPROM/flash).
pub const ERASED_BYTE: u8 = 0xFF;

// =============================================================================
// Byte Sources
// =============================================================================

/// Byte-addressable memory that can be dumped.
pub trait ByteSource {
    fn read_byte(
        &mut self,
        address: u16,
    ) -> u8;
}

impl<F> ByteSource for F
where
    F: FnMut(u16) -> u8,
{
    #[inline]
    fn read_byte(
        &mut self,
        address: u16,
    ) -> u8 {
        self(address)
    }
}

/// A byte slice mapped at `origin` in the 16-bit address space.
#[derive(Clone, Copy, Debug)]
pub struct SliceSource<'a> {
    origin: u16,
    bytes: &'a [u8],
}

impl<'a> SliceSource<'a> {
    pub const fn new(
        origin: u16,
        bytes: &'a [u8],
    ) -> Self {
        Self { origin, bytes }
    }
}

impl ByteSource for SliceSource<'_> {
    fn read_byte(
        &mut self,
        address: u16,
    ) -> u8 {
        let offset = usize::from(address.wrapping_sub(self.origin));
        self.bytes.get(offset).copied().unwrap_or(ERASED_BYTE)
    }
}

// =============================================================================
// Output Sink
// =============================================================================

/// Text output the dump is written to.
///
/// Calls arrive in emission order: hex pairs, short literals, single
/// characters and line breaks.
pub trait DumpSink {
    type Error;

    /// Two uppercase hex digits.
    fn hex_byte(
        &mut self,
        byte: u8,
    ) -> Result<(), Self::Error>;

    fn text(
        &mut self,
        text: &str,
    ) -> Result<(), Self::Error>;

    fn char(
        &mut self,
        c: char,
    ) -> Result<(), Self::Error>;

    fn line_break(&mut self) -> Result<(), Self::Error>;
}

/// [`DumpSink`] over any [`core::fmt::Write`] (UART writer, console buffer, string).
pub struct FmtSink<W>(pub W);

impl<W: Write> FmtSink<W> {
    pub const fn new(writer: W) -> Self { Self(writer) }

    pub fn into_inner(self) -> W { self.0 }
}

impl<W: Write> DumpSink for FmtSink<W> {
    type Error = fmt::Error;

    fn hex_byte(
        &mut self,
        byte: u8,
    ) -> fmt::Result {
        write!(self.0, "{byte:02X}")
    }

    fn text(
        &mut self,
        text: &str,
    ) -> fmt::Result {
        self.0.write_str(text)
    }

    fn char(
        &mut self,
        c: char,
    ) -> fmt::Result {
        self.0.write_char(c)
    }

    fn line_break(&mut self) -> fmt::Result { self.0.write_str(LINE_BREAK) }
}

// =============================================================================
// Dump Algorithm
// =============================================================================

/// Row header: high byte, low byte, separator.
fn write_address<K: DumpSink + ?Sized>(
    sink: &mut K,
    address: u16,
) -> Result<(), K::Error> {
    let [high, low] = address.to_be_bytes();
    sink.hex_byte(high)?;
    sink.hex_byte(low)?;
    sink.text(ADDRESS_SEPARATOR)
}

/// Dump `length` bytes of `source` starting at `start` into `sink`.
///
/// Only sink errors can fail the dump; a zero length still emits the
/// first-row spacing and the trailing line break.
pub fn dump_range<S, K>(
    source: &mut S,
    sink: &mut K,
    start: u16,
    length: u16,
) -> Result<(), K::Error>
where
    S: ByteSource + ?Sized,
    K: DumpSink + ?Sized,
{
    let lead = start % DUMP_COLUMNS;
    if lead != 0 {
        write_address(sink, start)?;
        for _ in 0..lead {
            sink.text(COLUMN_PLACEHOLDER)?;
        }
    }

    let mut address = start;
    for _ in 0..length {
        if address % DUMP_COLUMNS == 0 {
            sink.line_break()?;
            write_address(sink, address)?;
        }
        sink.hex_byte(source.read_byte(address))?;
        sink.char(' ')?;
        address = address.wrapping_add(1);
    }

    sink.line_break()
}

// =============================================================================
// RAM / EEPROM Dumper
// =============================================================================

/// Memory that [`MemoryDumper`] can read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    Ram,
    Eeprom,
}

impl Region {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ram => "RAM",
            Self::Eeprom => "EEPROM",
        }
    }
}

/// Dumper holding one byte source per memory region.
pub struct MemoryDumper<R, E> {
    ram: R,
    eeprom: E,
}

impl<R, E> MemoryDumper<R, E>
where
    R: ByteSource,
    E: ByteSource,
{
    pub const fn new(
        ram: R,
        eeprom: E,
    ) -> Self {
        Self { ram, eeprom }
    }

    /// Dump `length` bytes of `region` starting at `start`.
    pub fn dump_range<K>(
        &mut self,
        region: Region,
        sink: &mut K,
        start: u16,
        length: u16,
    ) -> Result<(), K::Error>
    where
        K: DumpSink + ?Sized,
    {
        match region {
            Region::Ram => dump_range(&mut self.ram, sink, start, length),
            Region::Eeprom => dump_range(&mut self.eeprom, sink, start, length),
        }
    }
}

// =============================================================================
// Dump Paging
// =============================================================================

/// Steps through a region one fixed-size dump at a time, wrapping at `span`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DumpCursor {
    next: u16,
    length: u16,
    /// Region size in bytes (up to the full 64 KiB address space).
    span: u32,
}

impl DumpCursor {
    pub const fn new(
        length: u16,
        span: u32,
    ) -> Self {
        Self { next: 0, length, span }
    }

    /// Bytes per dump.
    #[inline]
    pub const fn length(&self) -> u16 { self.length }

    /// Start address of the next dump, then move past it.
    pub fn advance(&mut self) -> u16 {
        let start = self.next;
        let span = self.span.clamp(1, 0x1_0000);
        self.next = ((u32::from(start) + u32::from(self.length)) % span) as u16;
        start
    }
}

// =============================================================================
// Tests
// =============================================================================
