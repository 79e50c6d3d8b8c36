//! Time abstraction traits for platform-agnostic timing.
//!
//! Two independent kinds of time flow through the crate: monotonic time
//! ([`TimeSource`], [`TimeInstant`], [`TimeDuration`]) drives the button
//! debouncer and buzzer sequencer, while wall-clock time ([`WallClock`])
//! drives the daily alarm scheduler. They are deliberately separate traits;
//! a monotonic tick counter must never be confused with a time of day.

use crate::types::{Date, TimeOfDay};

/// Trait for abstracting monotonic time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;

    /// Subtracts duration from instant, returns None on underflow.
    fn checked_sub(self, duration: Self::Duration) -> Option<Self>;
}

/// Trait for the wall-clock oracle (typically an NTP-synced RTC).
///
/// The scheduler treats this as read-only and performs no synchronization
/// itself: while [`is_synced`](WallClock::is_synced) reports `false`, every
/// scheduler operation is a safe no-op returning sentinel values. Local time
/// is assumed already correct; the crate does no timezone arithmetic.
pub trait WallClock {
    /// Returns true once a valid date and time are available.
    fn is_synced(&self) -> bool;

    /// Returns the current calendar date.
    fn date(&self) -> Date;

    /// Returns the current local time of day.
    fn time_of_day(&self) -> TimeOfDay;
}
