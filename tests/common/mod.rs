//! Shared test infrastructure for ramzan-alarm integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};

use ramzan_alarm::{
    ButtonPin, Buzzer, Date, PinState, TimeDuration, TimeInstant, TimeOfDay, TimeSource, WallClock,
};

// ============================================================================
// Mock Monotonic Time
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        Some(TestInstant(self.0 + duration.0))
    }

    fn checked_sub(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_sub(duration.0).map(TestInstant)
    }
}

/// Mock monotonic time source with controllable advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance_ms(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Button Pin
// ============================================================================

/// Raw pin level shared between the test body and the pin handed to the
/// debouncer.
pub struct PinLevel(Cell<PinState>);

impl PinLevel {
    pub fn new(state: PinState) -> Self {
        Self(Cell::new(state))
    }

    pub fn set(&self, state: PinState) {
        self.0.set(state);
    }
}

/// Mock pin reading the shared level
pub struct MockPin<'a>(pub &'a PinLevel);

impl ButtonPin for MockPin<'_> {
    fn read(&self) -> PinState {
        self.0.0.get()
    }
}

// ============================================================================
// Mock Buzzer
// ============================================================================

/// Mock buzzer that records every output transition
pub struct MockBuzzer<'a> {
    pub history: &'a RefCell<Vec<bool>>,
}

impl Buzzer for MockBuzzer<'_> {
    fn set_on(&mut self, on: bool) {
        self.history.borrow_mut().push(on);
    }
}

// ============================================================================
// Mock Wall Clock
// ============================================================================

/// Mock wall clock with settable sync state, date and time
pub struct MockClock {
    pub synced: Cell<bool>,
    pub date: Cell<Date>,
    pub time: Cell<TimeOfDay>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            synced: Cell::new(false),
            date: Cell::new(Date::new(1, 1)),
            time: Cell::new(TimeOfDay::new(0, 0, 0)),
        }
    }

    pub fn set(&self, date: Date, time: TimeOfDay) {
        self.synced.set(true);
        self.date.set(date);
        self.time.set(time);
    }
}

impl WallClock for MockClock {
    fn is_synced(&self) -> bool {
        self.synced.get()
    }

    fn date(&self) -> Date {
        self.date.get()
    }

    fn time_of_day(&self) -> TimeOfDay {
        self.time.get()
    }
}
