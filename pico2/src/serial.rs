//! UART console output.

use core::fmt;

/// `core::fmt::Write` adapter over a blocking byte writer.
///
/// Wraps a closure so the concrete UART type stays local to `main`.
pub struct SerialConsole<F>(F);

impl<F> SerialConsole<F>
where
    F: FnMut(&[u8]),
{
    pub const fn new(write: F) -> Self { Self(write) }
}

impl<F> fmt::Write for SerialConsole<F>
where
    F: FnMut(&[u8]),
{
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        (self.0)(s.as_bytes());
        Ok(())
    }
}
