//! Async tasks for the console firmware.
//!
//! - `tick`: Periodic debounce tick and debug mirror LEDs

pub mod tick;

pub use tick::{DebugMirror, SETTLE_EVENTS, tick_task};
