//! Debug console firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Debounces two push buttons on the Pimoroni PIM715 Display Pack 2.8" and
//! dumps memory as hex to the UART console and to the screen.
//!
//! # Architecture
//!
//! - Tick task: samples both buttons every `TICK_MS`, debounces them and sends
//!   settle events over a channel. Drives the debug mirror LEDs.
//! - Main task: receives settle events, logs them, runs dumps and redraws the
//!   screen.
//!
//! # Button Controls
//!
//! - **A** (input 1): Dump the next 128 bytes of SRAM
//! - **B** (input 2): Dump the next 128 bytes of the flash-backed EEPROM
//!
//! # Debug LEDs
//!
//! - **Red**: Raw level of input 1
//! - **Green**: Debounced level of input 2

#![no_std]
#![no_main]
#![allow(clippy::cast_possible_truncation)]

mod display;
mod log_buffer;
mod screen;
mod serial;
mod storage;
mod tasks;

use core::fmt::Write;

use console_inputs::config::{EEPROM_DUMP_LENGTH, EEPROM_SIZE, RAM_DUMP_LENGTH};
use console_inputs::{
    ActiveLow, ConsoleBuffer, DebounceConfig, DumpCursor, FmtSink, Input, InputDebouncer, MemoryDumper, Region,
};
use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::flash::Flash;
use embassy_rp::gpio::{self, Level, Output, Pull};
use embassy_rp::spi::Spi;
use embassy_rp::uart::{Config as UartConfig, UartTx};
use {defmt_rtt as _, panic_probe as _};

use crate::display::{display_spi_config, init_display};
use crate::screen::draw_screen;
use crate::serial::SerialConsole;
use crate::storage::{FlashEeprom, RAM_START, RamWindow};
use crate::tasks::{DebugMirror, SETTLE_EVENTS, tick_task};

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-console"),
    embassy_rp::binary_info::rp_program_description!(c"Debounced inputs and hex memory dump console"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Console firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Initialize RGB LED (active-low: Low = ON)
    // PIM715: Red=26, Green=27, Blue=28
    let led_r = Output::new(p.PIN_26, Level::High); // Off
    let led_g = Output::new(p.PIN_27, Level::High); // Off
    let _led_b = Output::new(p.PIN_28, Level::High); // Off

    // UART0 console on GPIO0 (TX), 115200 8N1
    let mut uart = UartTx::new_blocking(p.UART0, p.PIN_0, UartConfig::default());
    let mut serial = SerialConsole::new(|bytes: &[u8]| {
        uart.blocking_write(bytes).ok();
    });

    // Initialize display pins
    // PIM715 pinout: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let _backlight = Output::new(p.PIN_20, Level::High); // Turn on backlight

    // Initialize SPI (TX-only, display doesn't need MISO)
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config());
    let mut display = init_display(spi, cs, dc);
    log_info!("Display initialized");

    // Inputs: buttons A and B, active-low with internal pull-up
    // PIM715: A=12, B=13
    let input1 = ActiveLow(gpio::Input::new(p.PIN_12, Pull::Up));
    let input2 = ActiveLow(gpio::Input::new(p.PIN_13, Pull::Up));
    let config = DebounceConfig::default();
    let debouncer = InputDebouncer::new(input1, input2, config);
    let mut levels = [
        debouncer.stable_level(Input::Input1),
        debouncer.stable_level(Input::Input2),
    ];
    info!("Inputs initialized: {} (config {})", levels, config);

    spawner
        .spawn(tick_task(debouncer, DebugMirror::new(led_r, led_g)))
        .unwrap();
    info!("Tick task spawned");

    let flash = Flash::new_blocking(p.FLASH);
    let mut dumper = MemoryDumper::new(RamWindow::new(), FlashEeprom::new(flash));
    let mut console = ConsoleBuffer::new();

    write!(serial, "\r\nconsole-inputs ready: A = RAM dump, B = EEPROM dump\r\n").ok();
    write!(console, "A: dump RAM  B: dump EEPROM\n").ok();
    draw_screen(&mut display, &console, levels);

    // Each press pages forward through its region
    let mut ram_cursor = DumpCursor::new(RAM_DUMP_LENGTH, 0x1_0000);
    let mut eeprom_cursor = DumpCursor::new(EEPROM_DUMP_LENGTH, EEPROM_SIZE);

    loop {
        let event = SETTLE_EVENTS.receive().await;
        levels[event.input as usize] = event.level;
        log_info!("{} {}", event.input.label(), if event.level { "ON" } else { "OFF" });

        // Dump on press, not on release
        if event.level {
            let (region, cursor) = match event.input {
                Input::Input1 => (Region::Ram, &mut ram_cursor),
                Input::Input2 => (Region::Eeprom, &mut eeprom_cursor),
            };
            let length = cursor.length();
            let start = cursor.advance();

            console.clear();
            write!(console, "{} {:04X}\n", region.label(), start).ok();
            dumper.dump_range(region, &mut FmtSink::new(&mut console), start, length).ok();

            if region == Region::Ram {
                write!(serial, "\r\nRAM @ {:08X}", RAM_START + usize::from(start)).ok();
            } else {
                write!(serial, "\r\nEEPROM @ {:04X}", start).ok();
            }
            dumper.dump_range(region, &mut FmtSink::new(&mut serial), start, length).ok();
            log_debug!("{} dump {:04X}+{}", region.label(), start, length);
        }

        draw_screen(&mut display, &console, levels);
    }
}
