//! Display driver setup for Pimoroni PIM715 Display Pack 2.8" (ST7789).
//!
//! Pin mapping for PIM715:
//! - CS: GPIO17
//! - DC: GPIO16
//! - CLK: GPIO18 (SPI0 CLK)
//! - MOSI: GPIO19 (SPI0 TX)
//! - Backlight: GPIO20
//! - Reset: Tied to RUN pin (resets with Pico)
//!
//! The console only redraws on input events, so the blocking `mipidsi`
//! driver is enough; no framebuffer or DMA flush task.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation, Rotation};
use mipidsi::{Builder, NoResetPin};
use static_cell::StaticCell;

use console_inputs::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Display type alias for the ST7789 on PIM715 (no reset pin).
pub type ConsoleDisplay = mipidsi::Display<
    SpiInterface<'static, ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, NoDelay>, Output<'static>>,
    ST7789,
    NoResetPin,
>;

/// Pixel staging buffer for the SPI interface.
static SPI_BUFFER: StaticCell<[u8; 512]> = StaticCell::new();

/// Initialize the PIM715 display.
///
/// Must be called once; the SPI staging buffer is a singleton.
pub fn init_display(
    spi: Spi<'static, SPI0, Blocking>,
    cs: Output<'static>,
    dc: Output<'static>,
) -> ConsoleDisplay {
    // CS is a plain GPIO output, setting it cannot fail
    let spi_device = defmt::unwrap!(ExclusiveDevice::new_no_delay(spi, cs));
    let di = SpiInterface::new(spi_device, dc, SPI_BUFFER.init([0; 512]));

    // Native panel is 240x320 (portrait), rotated 90° for 320x240 (landscape)
    let result = Builder::new(ST7789, di)
        .display_size(SCREEN_HEIGHT as u16, SCREEN_WIDTH as u16)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .invert_colors(ColorInversion::Inverted)
        .init(&mut embassy_time::Delay);

    match result {
        Ok(display) => display,
        Err(_) => defmt::panic!("ST7789 init failed"),
    }
}

/// SPI configuration for the ST7789 display.
///
/// The ST7789 supports up to 62.5MHz SPI clock.
/// We use 40MHz for reliable operation.
pub fn display_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = 40_000_000;
    config
}
