//! Confidence-counter switch debouncing with press/hold/release events.
//!
//! Provides [`DebouncedButton`] which integrates raw samples from one noisy
//! binary input into a stable logical level, plus the [`ButtonPin`] trait for
//! hardware abstraction. Sampling is throttled internally to one raw read per
//! [`SAMPLE_INTERVAL_MS`], so the component tolerates being ticked
//! arbitrarily often; it must be ticked faster than its own settling time
//! (100 ms) to track real edges and faster than the long-press delay to
//! report holds promptly.

use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// Minimum wall-clock gap between raw samples, in milliseconds. Ticks that
/// arrive sooner are no-ops, giving a consistent integration window
/// regardless of control-loop speed.
pub const SAMPLE_INTERVAL_MS: u64 = 2;

/// Number of consecutive agreeing samples needed to accept a level flip.
/// 50 samples at 2 ms each gives a 100 ms settling time.
pub const CONFIDENCE_THRESHOLD: u8 = 50;

/// How long the stable level must stay pressed before a `Held` event fires.
pub const LONG_PRESS_MS: u64 = 2000;

/// Trait for abstracting one raw binary input.
///
/// Implement this for your switch hardware. The implementation translates
/// electrical polarity: an active-low input behind a pull-up reads
/// `Pressed` when the pin is low. Pull bias and wiring are the
/// implementation's concern; this crate assumes the pin never floats.
pub trait ButtonPin {
    /// Samples the raw, undebounced logical level once.
    fn read(&self) -> PinState;
}

/// A logical input level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// The switch is asserted (contact closed).
    Pressed,
    /// The switch is at rest.
    Released,
}

/// A discrete edge event produced by the debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// The stable level flipped to pressed.
    Pressed,
    /// The stable level has been pressed for longer than [`LONG_PRESS_MS`].
    /// Fires at most once per continuous press.
    Held,
    /// The stable level flipped to released.
    Released,
}

/// Debounces one physical switch into a stable level and one-shot events.
///
/// The debouncer cannot fail: every operation is non-blocking and
/// idempotent between samples. Events are one-shot; the most recent emission
/// per effective sample wins, and an event left unconsumed is replaced on
/// the next effective sample.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `P` - Pin implementation type
/// * `T` - Time source implementation type
pub struct DebouncedButton<'t, I: TimeInstant, P: ButtonPin, T: TimeSource<I>> {
    pin: P,
    time_source: &'t T,
    stable: PinState,
    confidence: u8,
    last_sample: I,
    press_start: I,
    long_press_fired: bool,
    changed: bool,
    pending: Option<ButtonEvent>,
}

impl<'t, I: TimeInstant, P: ButtonPin, T: TimeSource<I>> DebouncedButton<'t, I, P, T> {
    /// Creates a debouncer seeded from an immediate raw read.
    ///
    /// The confidence counter starts at the extreme matching the seed level
    /// (0 for pressed, [`CONFIDENCE_THRESHOLD`] for released), so startup
    /// never produces a spurious edge.
    pub fn new(pin: P, time_source: &'t T) -> Self {
        let now = time_source.now();
        let stable = pin.read();
        let confidence = match stable {
            PinState::Pressed => 0,
            PinState::Released => CONFIDENCE_THRESHOLD,
        };

        Self {
            pin,
            time_source,
            stable,
            confidence,
            last_sample: now,
            press_start: now,
            long_press_fired: false,
            changed: false,
            pending: None,
        }
    }

    /// Samples the pin and advances the debounce state machine.
    ///
    /// Returns immediately if less than [`SAMPLE_INTERVAL_MS`] has elapsed
    /// since the previous effective sample.
    pub fn tick(&mut self) {
        let now = self.time_source.now();
        if now.duration_since(self.last_sample).as_millis() < SAMPLE_INTERVAL_MS {
            return;
        }
        self.last_sample = now;

        self.pending = None;
        self.changed = false;

        // Integrate the raw reading toward one extreme.
        match self.pin.read() {
            PinState::Released => {
                if self.confidence < CONFIDENCE_THRESHOLD {
                    self.confidence += 1;
                }
            }
            PinState::Pressed => {
                self.confidence = self.confidence.saturating_sub(1);
            }
        }

        // A flip is accepted only at an extreme, and only from the opposite
        // stable level.
        if self.confidence == 0 && self.stable == PinState::Released {
            self.stable = PinState::Pressed;
            self.changed = true;
            self.press_start = now;
            self.long_press_fired = false;
            self.pending = Some(ButtonEvent::Pressed);
        } else if self.confidence == CONFIDENCE_THRESHOLD && self.stable == PinState::Pressed {
            self.stable = PinState::Released;
            self.changed = true;
            self.pending = Some(ButtonEvent::Released);
        }

        // Long-press detection runs independently of edge detection and
        // overrides a same-sample edge event.
        if self.stable == PinState::Pressed
            && !self.long_press_fired
            && now.duration_since(self.press_start).as_millis() > LONG_PRESS_MS
        {
            self.pending = Some(ButtonEvent::Held);
            self.long_press_fired = true;
            self.changed = true;
        }
    }

    /// Returns the pending event, if any, and clears it.
    pub fn consume_event(&mut self) -> Option<ButtonEvent> {
        self.pending.take()
    }

    /// Returns true if the stable level is pressed.
    pub fn is_pressed(&self) -> bool {
        self.stable == PinState::Pressed
    }

    /// Returns true if the most recent effective sample changed state or
    /// fired a hold.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Returns the stable, debounced level.
    pub fn state(&self) -> PinState {
        self.stable
    }
}
