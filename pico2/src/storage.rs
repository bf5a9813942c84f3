//! Byte sources for the hex dumper on RP2350.
//!
//! - [`RamWindow`]: 64 KiB of SRAM starting at `RAM_START`, read directly
//! - [`FlashEeprom`]: the reserved last flash sector, read through the flash driver
//!
//! The RP2350 has no EEPROM; the reserved sector stands in for it and reads
//! as `0xFF` until something is programmed there.

use console_inputs::ByteSource;
use console_inputs::config::{EEPROM_FLASH_OFFSET, EEPROM_SIZE, FLASH_SIZE};
use console_inputs::dump::ERASED_BYTE;
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::peripherals::FLASH;

/// RP2350 SRAM base address.
pub const RAM_START: usize = 0x2000_0000;

/// SRAM size (512KB striped across SRAM0-7).
const RAM_SIZE: usize = 512 * 1024;

/// Direct reads from a 64 KiB window of SRAM.
pub struct RamWindow {
    origin: usize,
}

impl RamWindow {
    /// Window at the start of SRAM.
    pub const fn new() -> Self { Self { origin: RAM_START } }
}

const _: () = assert!(RAM_START + u16::MAX as usize < RAM_START + RAM_SIZE);

impl ByteSource for RamWindow {
    fn read_byte(
        &mut self,
        address: u16,
    ) -> u8 {
        let ptr = (self.origin + usize::from(address)) as *const u8;
        // SAFETY: origin + u16 offset always lies inside SRAM (checked above),
        // which is readable at byte granularity.
        unsafe { core::ptr::read_volatile(ptr) }
    }
}

/// Reserved flash sector exposed as byte-addressable EEPROM.
pub struct FlashEeprom<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
}

impl<'d> FlashEeprom<'d> {
    pub fn new(flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>) -> Self { Self { flash } }
}

impl ByteSource for FlashEeprom<'_> {
    fn read_byte(
        &mut self,
        address: u16,
    ) -> u8 {
        let address = u32::from(address);
        if address >= EEPROM_SIZE {
            return ERASED_BYTE;
        }

        let mut byte = [ERASED_BYTE];
        if let Err(e) = self.flash.blocking_read(EEPROM_FLASH_OFFSET + address, &mut byte) {
            crate::log_warn!("EEPROM read {:04X}: {:?}", address, e);
            return ERASED_BYTE;
        }
        byte[0]
    }
}
