//! Non-blocking buzzer pattern sequencing.
//!
//! Provides [`BuzzerSequencer`] which drives a single binary sounder through
//! named, fully time-driven ON/OFF sequences, and the [`Buzzer`] trait for
//! hardware abstraction. Every pattern is a pure function of elapsed time
//! since the last step transition, so one `tick()` per control-loop
//! iteration suffices; ticking slower than a step only delays the
//! transition, it never corrupts state. Tick at 50 ms or faster to keep the
//! 200 ms confirmation rings audibly crisp.

use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// Trait for abstracting the sounder hardware.
///
/// Implement this for your buzzer or relay (GPIO, relay board, etc.). The
/// implementation translates electrical polarity: an active-low relay drives
/// the pin low for `on = true`. Handle any hardware errors internally - this
/// method cannot fail.
pub trait Buzzer {
    /// Turns the sounder on or off.
    fn set_on(&mut self, on: bool);
}

/// A named buzzer pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuzzerPattern {
    /// Early warning ahead of the Sehri cutoff. Long ring plus five short
    /// confirmation rings, then auto-off.
    PreSehri,
    /// Sehri cutoff / Iftar boundary. Same auto-off shape as `PreSehri`.
    SehriIftar,
    /// Short configurable beep sequence shared by Iftar and the prayer
    /// alarms.
    Prayer,
}

/// Step durations of the shared auto-off table, in milliseconds. The output
/// is ON at even indices: one 5 s ring, a 500 ms pause, then five 200 ms
/// rings with 200 ms gaps.
const AUTO_OFF_STEP_MS: [u64; 11] = [5000, 500, 200, 200, 200, 200, 200, 200, 200, 200, 200];

/// Floor applied to configured durations, in milliseconds.
const MIN_DURATION_MS: u32 = 100;

/// Drives one sounder through timed ON/OFF step sequences.
///
/// A pattern starts on explicit command, advances step-by-step purely as a
/// function of elapsed time, and self-terminates back to idle. `stop()` is
/// valid at any time (external silence requests).
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `B` - Buzzer implementation type
/// * `T` - Time source implementation type
pub struct BuzzerSequencer<'t, I: TimeInstant, B: Buzzer, T: TimeSource<I>> {
    buzzer: B,
    time_source: &'t T,
    active: Option<BuzzerPattern>,
    step_index: usize,
    last_transition: I,
    output_on: bool,
    prayer_beep_count: u32,
    prayer_beep_on_ms: u32,
    prayer_beep_gap_ms: u32,
    sehri_on_ms: u32,
    sehri_repeat_ms: u32,
    // Prayer shape snapshotted at start(); reconfiguration never touches a
    // pattern already in flight.
    run_total_steps: usize,
    run_on_ms: u32,
    run_gap_ms: u32,
}

impl<'t, I: TimeInstant, B: Buzzer, T: TimeSource<I>> BuzzerSequencer<'t, I, B, T> {
    /// Creates an idle sequencer with the sounder forced off.
    pub fn new(mut buzzer: B, time_source: &'t T) -> Self {
        buzzer.set_on(false);

        Self {
            buzzer,
            time_source,
            active: None,
            step_index: 0,
            last_transition: time_source.now(),
            output_on: false,
            prayer_beep_count: 2,
            prayer_beep_on_ms: 300,
            prayer_beep_gap_ms: 300,
            sehri_on_ms: 5000,
            sehri_repeat_ms: 10000,
            run_total_steps: 0,
            run_on_ms: 0,
            run_gap_ms: 0,
        }
    }

    /// Starts a pattern from step 0 with the output ON.
    ///
    /// Requesting the pattern that is already active is a no-op, so a
    /// repeated trigger cannot make a ring stutter mid-flight.
    pub fn start(&mut self, pattern: BuzzerPattern) {
        if self.active == Some(pattern) {
            return;
        }
        self.active = Some(pattern);
        self.step_index = 0;
        self.last_transition = self.time_source.now();
        if pattern == BuzzerPattern::Prayer {
            // 2*count - 1 steps total: the sequence ends right after the
            // final ON step, with no trailing OFF wait.
            self.run_total_steps = (self.prayer_beep_count as usize) * 2 - 1;
            self.run_on_ms = self.prayer_beep_on_ms;
            self.run_gap_ms = self.prayer_beep_gap_ms;
        }
        self.set_output(true);
    }

    /// Silences the sounder and clears any active pattern. Callable at any
    /// time.
    pub fn stop(&mut self) {
        self.active = None;
        self.step_index = 0;
        self.set_output(false);
    }

    /// Advances the active pattern if its current step has elapsed.
    ///
    /// No-op while idle. Advances at most one step per call.
    pub fn tick(&mut self) {
        let Some(pattern) = self.active else {
            return;
        };

        match pattern {
            BuzzerPattern::PreSehri | BuzzerPattern::SehriIftar => self.tick_auto_off(),
            BuzzerPattern::Prayer => self.tick_prayer(),
        }
    }

    fn tick_auto_off(&mut self) {
        let now = self.time_source.now();
        let elapsed = now.duration_since(self.last_transition).as_millis();

        let duration = AUTO_OFF_STEP_MS[self.step_index];
        if elapsed >= duration {
            self.step_index += 1;
            if self.step_index >= AUTO_OFF_STEP_MS.len() {
                self.stop();
            } else {
                self.set_output(self.step_index % 2 == 0);
                self.last_transition = now;
            }
        }
    }

    fn tick_prayer(&mut self) {
        let now = self.time_source.now();
        let elapsed = now.duration_since(self.last_transition).as_millis();

        // Even steps ring for the beep duration, odd steps rest for the gap.
        let duration = if self.step_index % 2 == 0 {
            self.run_on_ms
        } else {
            self.run_gap_ms
        };

        if elapsed >= duration as u64 {
            self.step_index += 1;

            if self.step_index >= self.run_total_steps {
                self.stop();
            } else {
                self.set_output(self.step_index % 2 == 0);
                self.last_transition = now;
            }
        }
    }

    /// Updates the prayer beep shape for future `start()` calls. Does not
    /// affect an in-flight pattern. Count is clamped to at least 1,
    /// durations to at least 100 ms.
    pub fn configure_prayer_pattern(&mut self, count: u32, on_ms: u32, gap_ms: u32) {
        self.prayer_beep_count = count.max(1);
        self.prayer_beep_on_ms = on_ms.max(MIN_DURATION_MS);
        self.prayer_beep_gap_ms = gap_ms.max(MIN_DURATION_MS);
    }

    /// Stores the Sehri/Iftar ring shape for configuration surfaces.
    /// Durations are clamped to at least 100 ms. The auto-off step table is
    /// currently fixed and does not consult these values.
    pub fn configure_sehri_pattern(&mut self, on_ms: u32, repeat_ms: u32) {
        self.sehri_on_ms = on_ms.max(MIN_DURATION_MS);
        self.sehri_repeat_ms = repeat_ms.max(MIN_DURATION_MS);
    }

    /// Returns the configured prayer shape as (count, on_ms, gap_ms).
    pub fn prayer_pattern(&self) -> (u32, u32, u32) {
        (
            self.prayer_beep_count,
            self.prayer_beep_on_ms,
            self.prayer_beep_gap_ms,
        )
    }

    /// Returns the stored Sehri/Iftar shape as (on_ms, repeat_ms).
    pub fn sehri_pattern(&self) -> (u32, u32) {
        (self.sehri_on_ms, self.sehri_repeat_ms)
    }

    /// Returns true while a pattern is in flight.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the pattern currently in flight, if any.
    pub fn active_pattern(&self) -> Option<BuzzerPattern> {
        self.active
    }

    /// Returns true while the sounder output is driven ON.
    pub fn is_on(&self) -> bool {
        self.output_on
    }

    fn set_output(&mut self, on: bool) {
        self.buzzer.set_on(on);
        self.output_on = on;
    }
}
