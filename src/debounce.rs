//! Two-channel input debouncer driven by a periodic tick.
//!
//! Each channel mirrors the last pin level it has seen (`stable`) and a
//! countdown of ticks. Any observed change re-arms the countdown; when the
//! countdown runs out with the pin unchanged, the channel settles and the
//! settle callback is invoked with the level.
//!
//! A pin that toggles faster than the debounce window keeps re-arming the
//! countdown and never settles. A change observed on the same tick the
//! countdown would have expired wins: the countdown re-arms and nothing fires.
//!
//! `tick()` does no allocation or blocking and runs in constant time, so it
//! can be called from a timer interrupt or a ticker task. It is not
//! re-entrant; the caller serializes calls.

use core::convert::Infallible;

use embedded_hal::digital::InputPin;

use crate::config::{DebounceConfig, clamp_ticks};

// =============================================================================
// Input Identification
// =============================================================================

/// One of the two debounced physical inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    Input1,
    Input2,
}

impl Input {
    /// All inputs in processing order.
    pub const ALL: [Self; 2] = [Self::Input1, Self::Input2];

    /// Short label for console output.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Input1 => "I1",
            Self::Input2 => "I2",
        }
    }
}

/// A channel settling on a new level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettleEvent {
    pub input: Input,
    /// Settled level (true = active).
    pub level: bool,
}

// =============================================================================
// Pin Sampling
// =============================================================================

/// Source of the instantaneous level of a physical input.
///
/// `true` means active ("pressed"); polarity is normalized by the sampler.
pub trait PinSampler {
    fn sample(&mut self) -> bool;
}

impl<F> PinSampler for F
where
    F: FnMut() -> bool,
{
    #[inline]
    fn sample(&mut self) -> bool { self() }
}

/// Input wired with a pull-up: a low level is active.
pub struct ActiveLow<P>(pub P);

impl<P> PinSampler for ActiveLow<P>
where
    P: InputPin<Error = Infallible>,
{
    #[inline]
    fn sample(&mut self) -> bool {
        match self.0.is_low() {
            Ok(low) => low,
            Err(never) => match never {},
        }
    }
}

/// Input wired with a pull-down: a high level is active.
pub struct ActiveHigh<P>(pub P);

impl<P> PinSampler for ActiveHigh<P>
where
    P: InputPin<Error = Infallible>,
{
    #[inline]
    fn sample(&mut self) -> bool {
        match self.0.is_high() {
            Ok(high) => high,
            Err(never) => match never {},
        }
    }
}

// =============================================================================
// Debounce Channel
// =============================================================================

/// Debounce state of a single input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceChannel {
    stable: bool,
    /// Ticks left before `stable` is accepted; 0 = idle.
    countdown: u8,
    length: u8,
}

impl DebounceChannel {
    /// Create an idle, inactive channel with the given debounce length.
    pub const fn new(length: u8) -> Self {
        Self {
            stable: false,
            countdown: 0,
            length: clamp_ticks(length),
        }
    }

    /// Adopt `level` as the stable value and go idle.
    pub fn initialize(
        &mut self,
        level: bool,
    ) {
        self.stable = level;
        self.countdown = 0;
    }

    /// Advance the channel by one tick with the current pin `level`.
    ///
    /// Returns `Some(level)` on the tick the channel settles.
    pub fn update(
        &mut self,
        level: bool,
    ) -> Option<bool> {
        // Any change re-arms the countdown, even if it was about to expire
        if level != self.stable {
            self.stable = level;
            self.countdown = self.length;
            return None;
        }

        if self.countdown == 0 {
            return None;
        }

        self.countdown -= 1;
        if self.countdown > 0 {
            return None;
        }

        Some(self.stable)
    }

    /// Last level seen on the pin.
    #[inline]
    pub const fn stable(&self) -> bool { self.stable }

    /// Remaining ticks before the current level settles (0 = idle).
    #[inline]
    pub const fn countdown(&self) -> u8 { self.countdown }

    /// Configured debounce length in ticks.
    #[inline]
    pub const fn length(&self) -> u8 { self.length }

    /// Whether a change is waiting to settle.
    #[inline]
    pub const fn is_settling(&self) -> bool { self.countdown > 0 }
}

// =============================================================================
// Two-Input Debouncer
// =============================================================================

/// Pin sampler paired with its channel state.
struct DebouncedInput<P> {
    pin: P,
    channel: DebounceChannel,
}

impl<P: PinSampler> DebouncedInput<P> {
    fn initialize(&mut self) {
        let level = self.pin.sample();
        self.channel.initialize(level);
    }

    fn update(&mut self) -> Option<bool> {
        let level = self.pin.sample();
        self.channel.update(level)
    }
}

/// Debouncer for the two physical inputs.
pub struct InputDebouncer<P1, P2> {
    input1: DebouncedInput<P1>,
    input2: DebouncedInput<P2>,
}

impl<P1, P2> InputDebouncer<P1, P2>
where
    P1: PinSampler,
    P2: PinSampler,
{
    /// Create a debouncer and take the initial pin readings.
    pub fn new(
        pin1: P1,
        pin2: P2,
        config: DebounceConfig,
    ) -> Self {
        let mut debouncer = Self {
            input1: DebouncedInput {
                pin: pin1,
                channel: DebounceChannel::new(config.input1_ticks),
            },
            input2: DebouncedInput {
                pin: pin2,
                channel: DebounceChannel::new(config.input2_ticks),
            },
        };
        debouncer.initialize();
        debouncer
    }

    /// Sample both pins once, adopt the readings as stable and clear countdowns.
    pub fn initialize(&mut self) {
        self.input1.initialize();
        self.input2.initialize();
    }

    /// Advance both channels by one tick, input 1 first.
    ///
    /// `on_settle` runs inline for each channel that settles on this tick.
    pub fn tick<F>(
        &mut self,
        mut on_settle: F,
    ) where
        F: FnMut(Input, bool),
    {
        if let Some(level) = self.input1.update() {
            on_settle(Input::Input1, level);
        }
        if let Some(level) = self.input2.update() {
            on_settle(Input::Input2, level);
        }
    }

    /// Last level seen on `input`.
    pub fn stable_level(
        &self,
        input: Input,
    ) -> bool {
        self.channel(input).stable()
    }

    /// Remaining ticks before `input` settles (0 = idle).
    pub fn countdown(
        &self,
        input: Input,
    ) -> u8 {
        self.channel(input).countdown()
    }

    /// Read the instantaneous level of `input`, bypassing the debounce.
    pub fn sample_raw(
        &mut self,
        input: Input,
    ) -> bool {
        match input {
            Input::Input1 => self.input1.pin.sample(),
            Input::Input2 => self.input2.pin.sample(),
        }
    }

    /// Copy of both channel states, in processing order.
    pub fn snapshot(&self) -> [DebounceChannel; 2] { [self.input1.channel, self.input2.channel] }

    fn channel(
        &self,
        input: Input,
    ) -> &DebounceChannel {
        match input {
            Input::Input1 => &self.input1.channel,
            Input::Input2 => &self.input2.channel,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use embedded_hal::digital::ErrorType;

    use super::*;

    /// Pin level shared between the test and the sampler closure.
    fn shared_pin(level: bool) -> (Rc<Cell<bool>>, impl FnMut() -> bool) {
        let pin = Rc::new(Cell::new(level));
        let reader = Rc::clone(&pin);
        (pin, move || reader.get())
    }

    /// Run `ticks` ticks and collect every settle event.
    fn run<P1: PinSampler, P2: PinSampler>(
        debouncer: &mut InputDebouncer<P1, P2>,
        ticks: usize,
    ) -> Vec<SettleEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            debouncer.tick(|input, level| events.push(SettleEvent { input, level }));
        }
        events
    }

    #[test]
    fn test_initialize_adopts_pin_levels() {
        let (_pin1, s1) = shared_pin(true);
        let (_pin2, s2) = shared_pin(false);
        let debouncer = InputDebouncer::new(s1, s2, DebounceConfig::new(5, 5));

        assert!(debouncer.stable_level(Input::Input1));
        assert!(!debouncer.stable_level(Input::Input2));
        assert_eq!(debouncer.countdown(Input::Input1), 0);
        assert_eq!(debouncer.countdown(Input::Input2), 0);
    }

    #[test]
    fn test_reinitialize_clears_pending_change() {
        let (pin1, s1) = shared_pin(false);
        let (_pin2, s2) = shared_pin(false);
        let mut debouncer = InputDebouncer::new(s1, s2, DebounceConfig::new(5, 5));

        pin1.set(true);
        assert!(run(&mut debouncer, 1).is_empty());
        assert_eq!(debouncer.countdown(Input::Input1), 5);

        debouncer.initialize();
        assert_eq!(debouncer.countdown(Input::Input1), 0);
        assert!(debouncer.stable_level(Input::Input1));
        assert!(run(&mut debouncer, 10).is_empty());
    }

    #[test]
    fn test_idle_when_pins_constant() {
        let (_pin1, s1) = shared_pin(false);
        let (_pin2, s2) = shared_pin(true);
        let mut debouncer = InputDebouncer::new(s1, s2, DebounceConfig::default());

        assert!(run(&mut debouncer, 500).is_empty());
    }

    #[test]
    fn test_steady_change_settles_once() {
        let (pin1, s1) = shared_pin(false);
        let (_pin2, s2) = shared_pin(false);
        let mut debouncer = InputDebouncer::new(s1, s2, DebounceConfig::new(4, 4));

        pin1.set(true);
        // Change tick arms the countdown
        assert!(run(&mut debouncer, 1).is_empty());
        // Three more ticks count down without firing
        assert!(run(&mut debouncer, 3).is_empty());
        assert_eq!(debouncer.countdown(Input::Input1), 1);
        // Fourth steady tick settles
        let events = run(&mut debouncer, 1);
        assert_eq!(
            events,
            [SettleEvent {
                input: Input::Input1,
                level: true
            }]
        );
        // And nothing after
        assert!(run(&mut debouncer, 100).is_empty());
    }

    #[test]
    fn test_oscillating_pin_never_settles() {
        let (pin1, s1) = shared_pin(false);
        let (_pin2, s2) = shared_pin(false);
        let mut debouncer = InputDebouncer::new(s1, s2, DebounceConfig::new(3, 3));

        for i in 0..200 {
            pin1.set(i % 2 == 0);
            assert!(run(&mut debouncer, 1).is_empty());
            assert_eq!(debouncer.countdown(Input::Input1), 3);
        }
    }

    #[test]
    fn test_bounce_restarts_countdown() {
        let (pin1, s1) = shared_pin(false);
        let (_pin2, s2) = shared_pin(false);
        let mut debouncer = InputDebouncer::new(s1, s2, DebounceConfig::new(5, 5));

        pin1.set(true);
        assert!(run(&mut debouncer, 3).is_empty());
        assert_eq!(debouncer.countdown(Input::Input1), 3);

        // Glitch low for one tick, then back high
        pin1.set(false);
        assert!(run(&mut debouncer, 1).is_empty());
        pin1.set(true);
        assert!(run(&mut debouncer, 1).is_empty());
        assert_eq!(debouncer.countdown(Input::Input1), 5);

        let events = run(&mut debouncer, 5);
        assert_eq!(events.len(), 1);
        assert!(events[0].level);
    }

    #[test]
    fn test_short_pulse_reports_return_level() {
        // Pin goes high for one tick, then low for good: the low level settles
        let (pin1, s1) = shared_pin(false);
        let (_pin2, s2) = shared_pin(false);
        let mut debouncer = InputDebouncer::new(s1, s2, DebounceConfig::new(10, 6));

        pin1.set(true);
        assert!(run(&mut debouncer, 1).is_empty());
        assert!(debouncer.stable_level(Input::Input1));

        pin1.set(false);
        assert!(run(&mut debouncer, 1).is_empty());
        assert!(!debouncer.stable_level(Input::Input1));
        assert_eq!(debouncer.countdown(Input::Input1), 10);

        assert!(run(&mut debouncer, 9).is_empty());
        let events = run(&mut debouncer, 1);
        assert_eq!(
            events,
            [SettleEvent {
                input: Input::Input1,
                level: false
            }]
        );
    }

    #[test]
    fn test_change_wins_over_expiry() {
        let mut channel = DebounceChannel::new(2);
        channel.initialize(false);

        assert_eq!(channel.update(true), None);
        assert_eq!(channel.countdown(), 2);
        assert_eq!(channel.update(true), None);
        assert_eq!(channel.countdown(), 1);

        // The tick that would expire sees a change instead
        assert_eq!(channel.update(false), None);
        assert_eq!(channel.countdown(), 2);
        assert!(!channel.stable());

        assert_eq!(channel.update(false), None);
        assert_eq!(channel.update(false), Some(false));
        assert!(!channel.is_settling());
    }

    #[test]
    fn test_zero_length_still_settles() {
        let mut channel = DebounceChannel::new(0);
        assert_eq!(channel.length(), 1);
        channel.initialize(false);

        assert_eq!(channel.update(true), None);
        assert_eq!(channel.update(true), Some(true));
    }

    #[test]
    fn test_zero_length_config_reports_change() {
        let (pin1, s1) = shared_pin(false);
        let (pin2, s2) = shared_pin(false);
        let mut debouncer = InputDebouncer::new(s1, s2, DebounceConfig::new(0, 0));

        pin1.set(true);
        pin2.set(true);
        // Change tick re-arms, the next steady tick settles
        assert!(run(&mut debouncer, 1).is_empty());
        assert_eq!(
            run(&mut debouncer, 1),
            [
                SettleEvent { input: Input::Input1, level: true },
                SettleEvent { input: Input::Input2, level: true },
            ]
        );
        assert!(run(&mut debouncer, 10).is_empty());
    }

    #[test]
    fn test_channels_independent_and_ordered() {
        let (pin1, s1) = shared_pin(false);
        let (pin2, s2) = shared_pin(false);
        let mut debouncer = InputDebouncer::new(s1, s2, DebounceConfig::new(3, 3));

        pin1.set(true);
        pin2.set(true);
        let events = run(&mut debouncer, 4);
        assert_eq!(
            events,
            [
                SettleEvent {
                    input: Input::Input1,
                    level: true
                },
                SettleEvent {
                    input: Input::Input2,
                    level: true
                },
            ]
        );

        // Only input 2 changes; input 1 stays idle
        pin2.set(false);
        let events = run(&mut debouncer, 4);
        assert_eq!(
            events,
            [SettleEvent {
                input: Input::Input2,
                level: false
            }]
        );
        assert_eq!(debouncer.countdown(Input::Input1), 0);
    }

    #[test]
    fn test_per_channel_lengths() {
        let (pin1, s1) = shared_pin(false);
        let (pin2, s2) = shared_pin(false);
        let mut debouncer = InputDebouncer::new(s1, s2, DebounceConfig::new(2, 6));

        pin1.set(true);
        pin2.set(true);
        let mut settled_at = Vec::new();
        for tick in 0..10 {
            debouncer.tick(|input, _| settled_at.push((input, tick)));
        }
        assert_eq!(settled_at, [(Input::Input1, 2), (Input::Input2, 6)]);
    }

    #[test]
    fn test_sample_raw_bypasses_debounce() {
        let (pin1, s1) = shared_pin(false);
        let (_pin2, s2) = shared_pin(false);
        let mut debouncer = InputDebouncer::new(s1, s2, DebounceConfig::default());

        pin1.set(true);
        assert!(debouncer.sample_raw(Input::Input1));
        // Sampling does not touch channel state
        assert!(!debouncer.stable_level(Input::Input1));
        assert_eq!(debouncer.snapshot()[0].countdown(), 0);
    }

    struct FakePin(bool);

    impl ErrorType for FakePin {
        type Error = Infallible;
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(self.0) }

        fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(!self.0) }
    }

    #[test]
    fn test_polarity_adapters() {
        assert!(ActiveLow(FakePin(false)).sample());
        assert!(!ActiveLow(FakePin(true)).sample());
        assert!(ActiveHigh(FakePin(true)).sample());
        assert!(!ActiveHigh(FakePin(false)).sample());
    }

    #[test]
    fn test_pull_up_button_reads_released_at_init() {
        // Idle pull-up input reads high, which is "not pressed"
        let debouncer = InputDebouncer::new(
            ActiveLow(FakePin(true)),
            ActiveLow(FakePin(false)),
            DebounceConfig::default(),
        );
        assert!(!debouncer.stable_level(Input::Input1));
        assert!(debouncer.stable_level(Input::Input2));
    }

    #[test]
    fn test_input_labels() {
        assert_eq!(Input::ALL, [Input::Input1, Input::Input2]);
        assert_eq!(Input::Input1.label(), "I1");
        assert_eq!(Input::Input2.label(), "I2");
    }
}
