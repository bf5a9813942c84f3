//! Console inputs library - testable logic for the debug console firmware.
//!
//! This library contains the platform-agnostic pieces of the firmware:
//!
//! - [`debounce`]: Two-channel digital input debouncer driven by a periodic tick
//! - [`dump`]: Hex memory dumper for RAM and persistent storage
//! - [`console`]: Line buffer and renderer for the on-screen debug console
//! - [`config`]: Compile-time timing, layout and storage constants
//! - [`colors`]: RGB565 color constants
//!
//! The binary in `pico2/` uses this library and adds the embedded-specific code.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

pub mod colors;
pub mod config;
pub mod console;
pub mod debounce;
pub mod dump;

// Re-export commonly used items
pub use config::DebounceConfig;
pub use console::ConsoleBuffer;
pub use debounce::{ActiveHigh, ActiveLow, Input, InputDebouncer, PinSampler, SettleEvent};
pub use dump::{ByteSource, DumpCursor, DumpSink, FmtSink, MemoryDumper, Region, SliceSource, dump_range};
