//! Static Sehri/Iftar timetable data and lookup.
//!
//! The timetable is an ordered, immutable list of per-day records for the
//! observance period, one entry per calendar date. The scheduler borrows a
//! slice of entries and looks dates up by exact (month, day) match with a
//! linear scan; at a few tens of entries that is cheaper than anything
//! fancier. A port with a much larger calendar should swap in a date-indexed
//! lookup without changing observable behavior.

use crate::types::Date;

/// One day's Sehri cutoff and Iftar time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimetableEntry {
    pub month: u8,
    pub day: u8,
    /// Sehri end (pre-dawn meal cutoff).
    pub sehri_hour: u8,
    pub sehri_minute: u8,
    /// Iftar (fast end).
    pub iftar_hour: u8,
    pub iftar_minute: u8,
}

impl TimetableEntry {
    /// Creates a new timetable entry.
    #[inline]
    pub const fn new(
        month: u8,
        day: u8,
        sehri_hour: u8,
        sehri_minute: u8,
        iftar_hour: u8,
        iftar_minute: u8,
    ) -> Self {
        Self {
            month,
            day,
            sehri_hour,
            sehri_minute,
            iftar_hour,
            iftar_minute,
        }
    }

    /// Sehri cutoff as minutes since midnight, before any offset.
    #[inline]
    pub const fn sehri_minutes_of_day(&self) -> u16 {
        self.sehri_hour as u16 * 60 + self.sehri_minute as u16
    }

    /// Iftar time as minutes since midnight, before any offset.
    #[inline]
    pub const fn iftar_minutes_of_day(&self) -> u16 {
        self.iftar_hour as u16 * 60 + self.iftar_minute as u16
    }

    /// Validates field ranges. Intended for configuration surfaces that
    /// accept user-supplied tables at runtime; the built-in table is already
    /// well-formed.
    pub fn validate(&self) -> Result<(), TimetableError> {
        if self.month < 1 || self.month > 12 || self.day < 1 || self.day > 31 {
            return Err(TimetableError::InvalidDate);
        }
        if self.sehri_hour > 23
            || self.sehri_minute > 59
            || self.iftar_hour > 23
            || self.iftar_minute > 59
        {
            return Err(TimetableError::InvalidTime);
        }
        Ok(())
    }
}

/// Timetable validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimetableError {
    /// Month or day outside calendar range.
    InvalidDate,

    /// Hour or minute outside clock range.
    InvalidTime,
}

impl core::fmt::Display for TimetableError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TimetableError::InvalidDate => write!(f, "entry date is not a valid calendar date"),
            TimetableError::InvalidTime => write!(f, "entry time is not a valid clock time"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TimetableError {}

/// Returns the index of the entry matching `date`, if any. First exact match
/// wins; the table holds at most one entry per date so order does not affect
/// correctness.
pub fn position(table: &[TimetableEntry], date: Date) -> Option<usize> {
    table
        .iter()
        .position(|e| e.month == date.month && e.day == date.day)
}

/// Returns the entry matching `date`, if any.
pub fn lookup(table: &[TimetableEntry], date: Date) -> Option<&TimetableEntry> {
    position(table, date).map(|i| &table[i])
}

/// Navsari Ramzan 1447 AH (Feb-Mar 2026) timetable.
///
/// Format per entry: month, day, Sehri end, Iftar.
pub const NAVSARI_1447: [TimetableEntry; 30] = [
    TimetableEntry::new(2, 19, 5, 42, 18, 43), // Roza 1
    TimetableEntry::new(2, 20, 5, 42, 18, 44), // Roza 2
    TimetableEntry::new(2, 21, 5, 41, 18, 44), // Roza 3
    TimetableEntry::new(2, 22, 5, 40, 18, 45), // Roza 4
    TimetableEntry::new(2, 23, 5, 40, 18, 45), // Roza 5
    TimetableEntry::new(2, 24, 5, 39, 18, 46), // Roza 6
    TimetableEntry::new(2, 25, 5, 38, 18, 46), // Roza 7
    TimetableEntry::new(2, 26, 5, 38, 18, 47), // Roza 8
    TimetableEntry::new(2, 27, 5, 37, 18, 47), // Roza 9
    TimetableEntry::new(2, 28, 5, 36, 18, 47), // Roza 10
    TimetableEntry::new(3, 1, 5, 35, 18, 48),  // Roza 11
    TimetableEntry::new(3, 2, 5, 35, 18, 48),  // Roza 12
    TimetableEntry::new(3, 3, 5, 34, 18, 49),  // Roza 13
    TimetableEntry::new(3, 4, 5, 33, 18, 49),  // Roza 14
    TimetableEntry::new(3, 5, 5, 32, 18, 50),  // Roza 15
    TimetableEntry::new(3, 6, 5, 32, 18, 50),  // Roza 16
    TimetableEntry::new(3, 7, 5, 31, 18, 51),  // Roza 17
    TimetableEntry::new(3, 8, 5, 30, 18, 51),  // Roza 18
    TimetableEntry::new(3, 9, 5, 29, 18, 51),  // Roza 19
    TimetableEntry::new(3, 10, 5, 28, 18, 52), // Roza 20
    TimetableEntry::new(3, 11, 5, 27, 18, 52), // Roza 21
    TimetableEntry::new(3, 12, 5, 27, 18, 52), // Roza 22
    TimetableEntry::new(3, 13, 5, 26, 18, 53), // Roza 23
    TimetableEntry::new(3, 14, 5, 25, 18, 53), // Roza 24
    TimetableEntry::new(3, 15, 5, 24, 18, 53), // Roza 25
    TimetableEntry::new(3, 16, 5, 23, 18, 54), // Roza 26
    TimetableEntry::new(3, 17, 5, 22, 18, 54), // Roza 27
    TimetableEntry::new(3, 18, 5, 21, 18, 54), // Roza 28
    TimetableEntry::new(3, 19, 5, 20, 18, 55), // Roza 29
    TimetableEntry::new(3, 20, 5, 19, 18, 55), // Roza 30
];
