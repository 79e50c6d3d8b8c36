//! Core calendar and alarm types shared across the crate.

use core::fmt;

/// A calendar date within the observance period. Year-agnostic: the static
/// timetable is keyed by (month, day) only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Date {
    pub month: u8,
    pub day: u8,
}

impl Date {
    /// Creates a new date.
    #[inline]
    pub const fn new(month: u8, day: u8) -> Self {
        Self { month, day }
    }
}

/// A local wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    /// Creates a new time of day. Values are not range-checked; callers feed
    /// this from an RTC that already produces valid fields.
    #[inline]
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Creates a time of day (seconds zero) from a minute-of-day in `[0, 1440)`.
    pub const fn from_minutes_of_day(minutes: u16) -> Self {
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
            second: 0,
        }
    }

    /// Minutes elapsed since midnight, ignoring seconds.
    #[inline]
    pub const fn minutes_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Seconds elapsed since midnight.
    #[inline]
    pub const fn seconds_of_day(&self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }
}

impl fmt::Display for TimeOfDay {
    /// Formats as zero-padded `HH:MM` (seconds are display-irrelevant).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Wraps a signed minute-of-day sum into `[0, 1440)`.
///
/// Offset arithmetic on alarm times always passes through here so that
/// stored hour/minute pairs stay normalized regardless of how large or how
/// negative a configured offset is.
pub(crate) const fn wrap_minutes_of_day(total: i32) -> u16 {
    total.rem_euclid(24 * 60) as u16
}

/// The four fixed daily prayer slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prayer {
    Fajr,
    Zohr,
    Asr,
    Isha,
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Prayer::Fajr => "Fajr",
            Prayer::Zohr => "Zohr",
            Prayer::Asr => "Asr",
            Prayer::Isha => "Isha",
        };
        f.write_str(name)
    }
}

/// A latched alarm event reported by [`AlarmScheduler::check_trigger`].
///
/// Each source event gets its own variant. Downstream pattern selection
/// treats `Iftar` and `Prayer(_)` identically (both start the short prayer
/// beep pattern); they stay distinct here so the orchestrator and any logs
/// can tell them apart.
///
/// [`AlarmScheduler::check_trigger`]: crate::scheduler::AlarmScheduler::check_trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmTrigger {
    /// The configurable early warning ahead of the Sehri cutoff.
    PreSehri,
    /// The exact Sehri (pre-dawn meal) cutoff.
    SehriEnd,
    /// The Iftar (fast end) time.
    Iftar,
    /// One of the four fixed prayer times.
    Prayer(Prayer),
}

/// A named alarm slot as shown on displays and in the schedule snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmSlot {
    PreSehri,
    Sehri,
    Iftar,
    Fajr,
    Zohr,
    Asr,
    Isha,
}

impl AlarmSlot {
    /// Display name of the slot.
    pub const fn name(&self) -> &'static str {
        match self {
            AlarmSlot::PreSehri => "Pre-Sehri",
            AlarmSlot::Sehri => "Sehri",
            AlarmSlot::Iftar => "Iftar",
            AlarmSlot::Fajr => "Fajr",
            AlarmSlot::Zohr => "Zohr",
            AlarmSlot::Asr => "Asr",
            AlarmSlot::Isha => "Isha",
        }
    }
}

impl From<Prayer> for AlarmSlot {
    fn from(prayer: Prayer) -> Self {
        match prayer {
            Prayer::Fajr => AlarmSlot::Fajr,
            Prayer::Zohr => AlarmSlot::Zohr,
            Prayer::Asr => AlarmSlot::Asr,
            Prayer::Isha => AlarmSlot::Isha,
        }
    }
}

impl fmt::Display for AlarmSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which calendar day a schedule entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DayBucket {
    Today,
    Tomorrow,
}

impl fmt::Display for DayBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DayBucket::Today => "Today",
            DayBucket::Tomorrow => "Tom",
        })
    }
}

/// One row of the upcoming-schedule snapshot consumed by the display and
/// web UI layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduleEntry {
    pub bucket: DayBucket,
    pub slot: AlarmSlot,
    pub time: TimeOfDay,
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::format;

    #[test]
    fn minutes_of_day_round_trip() {
        let t = TimeOfDay::new(5, 42, 0);
        assert_eq!(t.minutes_of_day(), 342);
        assert_eq!(TimeOfDay::from_minutes_of_day(342), t);
    }

    #[test]
    fn offset_wraps_forward_past_midnight() {
        // 23:50 plus a +600 minute offset lands at 09:50 the nominal
        // same day, never negative or >= 1440.
        let wrapped = wrap_minutes_of_day(23 * 60 + 50 + 600);
        assert_eq!(wrapped, 9 * 60 + 50);
        assert_eq!(TimeOfDay::from_minutes_of_day(wrapped), TimeOfDay::new(9, 50, 0));
    }

    #[test]
    fn offset_wraps_backward_past_midnight() {
        let wrapped = wrap_minutes_of_day(10 - 30);
        assert_eq!(wrapped, 23 * 60 + 40);
    }

    #[test]
    fn offset_wraps_large_negative() {
        assert_eq!(wrap_minutes_of_day(-1440 * 2 + 5), 5);
    }

    #[test]
    fn time_formats_zero_padded() {
        assert_eq!(format!("{}", TimeOfDay::new(5, 4, 0)), "05:04");
        assert_eq!(format!("{}", TimeOfDay::new(18, 43, 59)), "18:43");
    }
}
