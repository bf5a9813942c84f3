//! Debounce tick task.
//!
//! Runs `InputDebouncer::tick` every `TICK_MS` from an embassy `Ticker` and
//! forwards settle events to the console over a channel. The debouncer is
//! owned by this task alone, so ticks never overlap.

use console_inputs::config::TICK_MS;
use console_inputs::{ActiveLow, Input, InputDebouncer, SettleEvent};
use defmt::{trace, warn};
use embassy_rp::gpio::{self, Level, Output};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Ticker};

/// Debouncer over the two pull-up buttons.
pub type InputsDebouncer = InputDebouncer<ActiveLow<gpio::Input<'static>>, ActiveLow<gpio::Input<'static>>>;

/// Settle events from the tick task to the console.
pub static SETTLE_EVENTS: Channel<CriticalSectionRawMutex, SettleEvent, 8> = Channel::new();

/// Debug LEDs (active-low RGB LED on the PIM715).
///
/// Red follows the raw input 1 pin, green the debounced input 2 level.
pub struct DebugMirror {
    raw1: Output<'static>,
    stable2: Output<'static>,
}

impl DebugMirror {
    pub fn new(
        red: Output<'static>,
        green: Output<'static>,
    ) -> Self {
        Self {
            raw1: red,
            stable2: green,
        }
    }

    fn update(
        &mut self,
        debouncer: &mut InputsDebouncer,
    ) {
        let raw1 = debouncer.sample_raw(Input::Input1);
        let stable2 = debouncer.stable_level(Input::Input2);
        self.raw1.set_level(Level::from(!raw1));
        self.stable2.set_level(Level::from(!stable2));
    }
}

/// Debounce tick task.
#[embassy_executor::task]
pub async fn tick_task(
    mut debouncer: InputsDebouncer,
    mut mirror: DebugMirror,
) {
    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));

    loop {
        debouncer.tick(|input, level| {
            trace!("{} settled {}", input, level);
            if SETTLE_EVENTS.try_send(SettleEvent { input, level }).is_err() {
                warn!("settle event dropped: {}", input);
            }
        });
        mirror.update(&mut debouncer);

        ticker.next().await;
    }
}
