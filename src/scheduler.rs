//! Daily alarm scheduling from the static timetable.
//!
//! Provides [`AlarmScheduler`] which owns the current day's alarm set,
//! reloads it on every calendar-day change, and decides once per
//! control-loop tick whether an alarm is due right now. Each alarm carries a
//! one-shot latch: once set for the current day it is never cleared until
//! the next day-load, so no alarm can fire twice.
//!
//! Triggering uses a 5-second acceptance window at the target minute
//! (`second < 5`). The control loop must call [`check_trigger`] (or
//! [`service`]) at least once every 5 seconds of wall-clock time; that is a
//! hard scheduling contract, not an optimization.
//!
//! [`check_trigger`]: AlarmScheduler::check_trigger
//! [`service`]: AlarmScheduler::service

use core::fmt::Write as _;

use heapless::{String, Vec};

use crate::time::WallClock;
use crate::timetable::{self, TimetableEntry};
use crate::types::{
    AlarmSlot, AlarmTrigger, Date, DayBucket, Prayer, ScheduleEntry, TimeOfDay,
    wrap_minutes_of_day,
};

/// Fixed prayer times in minutes of day: Fajr 06:00, Zohr 13:00, Asr 17:05,
/// Isha 20:00. These follow the official schedule policy and do not vary by
/// date or timetable.
const PRAYER_TIMES: [(Prayer, u16); 4] = [
    (Prayer::Fajr, 6 * 60),
    (Prayer::Zohr, 13 * 60),
    (Prayer::Asr, 17 * 60 + 5),
    (Prayer::Isha, 20 * 60),
];

/// User-adjustable scheduling configuration.
///
/// Offsets are applied additively to the timetable's Sehri/Iftar minutes
/// with wraparound into `[0, 1440)`; the lead is subtracted from the Sehri
/// time to derive the pre-Sehri warning. All values take effect on the next
/// day-load, or immediately for interval-based queries; none require a
/// restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SchedulerConfig {
    /// Signed minutes added to the timetable Sehri time.
    pub sehri_offset_min: i16,
    /// Signed minutes added to the timetable Iftar time.
    pub iftar_offset_min: i16,
    /// Minutes before the Sehri time at which the pre-Sehri warning fires.
    pub pre_sehri_lead_min: u16,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            sehri_offset_min: 0,
            iftar_offset_min: 0,
            pre_sehri_lead_min: 60,
        }
    }
}

/// One fixed prayer slot for the current day.
#[derive(Debug, Clone, Copy)]
struct PrayerSlot {
    prayer: Prayer,
    minutes: u16,
    triggered: bool,
}

/// The current day's alarm set. Recreated once per calendar day; all
/// stored minutes are normalized into `[0, 1440)`.
#[derive(Debug, Clone, Copy)]
struct DailyAlarms {
    has_sehri: bool,
    sehri_minutes: u16,
    sehri_triggered: bool,
    pre_sehri_triggered: bool,
    sehri_end_triggered: bool,

    has_iftar: bool,
    iftar_minutes: u16,
    iftar_triggered: bool,

    prayers: [PrayerSlot; 4],
}

impl DailyAlarms {
    fn empty() -> Self {
        Self {
            has_sehri: false,
            sehri_minutes: 0,
            sehri_triggered: false,
            pre_sehri_triggered: false,
            sehri_end_triggered: false,
            has_iftar: false,
            iftar_minutes: 0,
            iftar_triggered: false,
            prayers: [
                PrayerSlot {
                    prayer: Prayer::Fajr,
                    minutes: 0,
                    triggered: false,
                },
                PrayerSlot {
                    prayer: Prayer::Zohr,
                    minutes: 0,
                    triggered: false,
                },
                PrayerSlot {
                    prayer: Prayer::Asr,
                    minutes: 0,
                    triggered: false,
                },
                PrayerSlot {
                    prayer: Prayer::Isha,
                    minutes: 0,
                    triggered: false,
                },
            ],
        }
    }
}

/// Schedules the day's alarms against a borrowed static timetable.
///
/// The scheduler holds no clock of its own: the control loop feeds it the
/// current date and time each tick, usually via [`service`] and a
/// [`WallClock`] implementation. Until the first valid reading it stays
/// unloaded and every query returns its sentinel value.
///
/// [`service`]: AlarmScheduler::service
pub struct AlarmScheduler<'a> {
    timetable: &'a [TimetableEntry],
    config: SchedulerConfig,
    today: DailyAlarms,
    current_date: Option<Date>,
    alarm_started_ms: Option<u64>,
    last_alarm_duration_secs: Option<u32>,
}

impl<'a> AlarmScheduler<'a> {
    /// Creates an unloaded scheduler over the given timetable with default
    /// configuration.
    pub fn new(timetable: &'a [TimetableEntry]) -> Self {
        Self::with_config(timetable, SchedulerConfig::default())
    }

    /// Creates an unloaded scheduler with explicit configuration.
    pub fn with_config(timetable: &'a [TimetableEntry], config: SchedulerConfig) -> Self {
        Self {
            timetable,
            config,
            today: DailyAlarms::empty(),
            current_date: None,
            alarm_started_ms: None,
            last_alarm_duration_secs: None,
        }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> SchedulerConfig {
        self.config
    }

    /// Sets the Sehri and Iftar offsets in signed minutes. Takes effect on
    /// the next day-load; interval queries against tomorrow see it
    /// immediately.
    pub fn set_offsets(&mut self, sehri_min: i16, iftar_min: i16) {
        self.config.sehri_offset_min = sehri_min;
        self.config.iftar_offset_min = iftar_min;
    }

    /// Sets the pre-Sehri warning lead in minutes.
    pub fn set_pre_sehri_lead(&mut self, minutes: u16) {
        self.config.pre_sehri_lead_min = minutes;
    }

    /// Drives the per-day state machine: reloads the alarm set when the
    /// calendar date changes, then latches any alarm whose time has already
    /// strictly passed (catch-up sweep).
    ///
    /// The sweep means an alarm missed while the process was not running
    /// (reboot, long stall) is marked handled instead of firing late; a
    /// silent miss is preferred over a stale ring.
    pub fn tick(&mut self, date: Date, time: TimeOfDay) {
        if self.current_date != Some(date) {
            self.load_day(date);
        }
        self.catch_up(time);
    }

    /// Reads the wall clock and, if it is synced, runs [`tick`] followed by
    /// [`check_trigger`]. Returns `None` while the clock is unsynced.
    ///
    /// [`tick`]: AlarmScheduler::tick
    /// [`check_trigger`]: AlarmScheduler::check_trigger
    pub fn service<C: WallClock>(&mut self, clock: &C) -> Option<AlarmTrigger> {
        if !clock.is_synced() {
            return None;
        }
        let time = clock.time_of_day();
        self.tick(clock.date(), time);
        self.check_trigger(time)
    }

    /// Checks whether an alarm is due at `time`, latching and returning at
    /// most one per call.
    ///
    /// An alarm is due when the current hour and minute equal its target and
    /// `time.second < 5`, so polling once per second cannot skip it.
    /// Priority order: pre-Sehri, Sehri end, Iftar, then the four prayers;
    /// each check is latched independently. A day without a timetable entry
    /// skips the Sehri/Iftar checks but still fires prayers.
    pub fn check_trigger(&mut self, time: TimeOfDay) -> Option<AlarmTrigger> {
        if self.current_date.is_none() {
            return None;
        }

        let now_min = time.minutes_of_day();
        let in_window = time.second < 5;
        if !in_window {
            return None;
        }

        if self.today.has_sehri
            && !self.today.pre_sehri_triggered
            && now_min == self.pre_sehri_minutes()
        {
            self.today.pre_sehri_triggered = true;
            return Some(AlarmTrigger::PreSehri);
        }

        if self.today.has_sehri
            && !self.today.sehri_end_triggered
            && now_min == self.today.sehri_minutes
        {
            self.today.sehri_end_triggered = true;
            return Some(AlarmTrigger::SehriEnd);
        }

        if self.today.has_iftar
            && !self.today.iftar_triggered
            && now_min == self.today.iftar_minutes
        {
            self.today.iftar_triggered = true;
            return Some(AlarmTrigger::Iftar);
        }

        for slot in self.today.prayers.iter_mut() {
            if !slot.triggered && now_min == slot.minutes {
                slot.triggered = true;
                return Some(AlarmTrigger::Prayer(slot.prayer));
            }
        }

        None
    }

    /// Returns the seconds from `now` until the next untriggered alarm.
    ///
    /// Today's untriggered alarms are considered first (smallest
    /// non-negative distance wins); when all of today is done, falls through
    /// to tomorrow's pre-Sehri warning with a full day added. Returns `None`
    /// before the first day-load or when no future alarm can be determined.
    pub fn seconds_until_next_alarm(&self, now: TimeOfDay) -> Option<u32> {
        if self.current_date.is_none() {
            return None;
        }

        let now_secs = now.seconds_of_day() as i64;
        let mut best: Option<i64> = None;

        let mut consider = |minutes: u16, triggered: bool| {
            if triggered {
                return;
            }
            let diff = minutes as i64 * 60 - now_secs;
            if diff >= 0 && best.is_none_or(|b| diff < b) {
                best = Some(diff);
            }
        };

        if self.today.has_sehri {
            consider(self.pre_sehri_minutes(), self.today.pre_sehri_triggered);
            consider(self.today.sehri_minutes, self.today.sehri_triggered);
        }
        if self.today.has_iftar {
            consider(self.today.iftar_minutes, self.today.iftar_triggered);
        }
        for slot in &self.today.prayers {
            consider(slot.minutes, slot.triggered);
        }

        if let Some(diff) = best {
            return Some(diff as u32);
        }

        // Nothing left today: distance to tomorrow's pre-Sehri warning.
        let entry = self.tomorrow_entry()?;
        let sehri = wrap_minutes_of_day(
            entry.sehri_minutes_of_day() as i32 + self.config.sehri_offset_min as i32,
        );
        let pre = wrap_minutes_of_day(sehri as i32 - self.config.pre_sehri_lead_min as i32);
        Some((86400 - now_secs as u32) + pre as u32 * 60)
    }

    /// Returns the next untriggered alarm in priority order, falling
    /// through to tomorrow's Sehri when today is exhausted. `None` before
    /// the first day-load or when no future alarm exists.
    pub fn next_alarm(&self) -> Option<ScheduleEntry> {
        self.current_date?;

        let entry = |slot: AlarmSlot, minutes: u16| ScheduleEntry {
            bucket: DayBucket::Today,
            slot,
            time: TimeOfDay::from_minutes_of_day(minutes),
        };

        if self.today.has_sehri && !self.today.pre_sehri_triggered {
            return Some(entry(AlarmSlot::PreSehri, self.pre_sehri_minutes()));
        }
        if self.today.has_sehri && !self.today.sehri_triggered {
            return Some(entry(AlarmSlot::Sehri, self.today.sehri_minutes));
        }
        if self.today.has_iftar && !self.today.iftar_triggered {
            return Some(entry(AlarmSlot::Iftar, self.today.iftar_minutes));
        }
        for slot in &self.today.prayers {
            if !slot.triggered {
                return Some(entry(slot.prayer.into(), slot.minutes));
            }
        }

        self.tomorrow_sehri_time().map(|time| ScheduleEntry {
            bucket: DayBucket::Tomorrow,
            slot: AlarmSlot::Sehri,
            time,
        })
    }

    /// Display label for the next alarm: `"Loading"` before the first
    /// day-load, `"Sehri (Tom)"` when today is exhausted.
    pub fn next_alarm_label(&self) -> &'static str {
        match self.next_alarm() {
            None if self.current_date.is_none() => "Loading",
            None => "--",
            Some(e) if e.bucket == DayBucket::Tomorrow => "Sehri (Tom)",
            Some(e) => e.slot.name(),
        }
    }

    /// Display time for the next alarm, `"--:--"` when unknown.
    pub fn next_alarm_time_string(&self) -> String<8> {
        format_time(self.next_alarm().map(|e| e.time))
    }

    /// Today's Sehri time after offsets, if today has a timetable entry.
    pub fn today_sehri_time(&self) -> Option<TimeOfDay> {
        (self.current_date.is_some() && self.today.has_sehri)
            .then(|| TimeOfDay::from_minutes_of_day(self.today.sehri_minutes))
    }

    /// Today's Iftar time after offsets, if today has a timetable entry.
    pub fn today_iftar_time(&self) -> Option<TimeOfDay> {
        (self.current_date.is_some() && self.today.has_iftar)
            .then(|| TimeOfDay::from_minutes_of_day(self.today.iftar_minutes))
    }

    /// Tomorrow's Sehri time with the current offset applied, if a
    /// tomorrow entry exists.
    pub fn tomorrow_sehri_time(&self) -> Option<TimeOfDay> {
        self.tomorrow_entry().map(|e| {
            TimeOfDay::from_minutes_of_day(wrap_minutes_of_day(
                e.sehri_minutes_of_day() as i32 + self.config.sehri_offset_min as i32,
            ))
        })
    }

    /// Tomorrow's Iftar time with the current offset applied, if a
    /// tomorrow entry exists.
    pub fn tomorrow_iftar_time(&self) -> Option<TimeOfDay> {
        self.tomorrow_entry().map(|e| {
            TimeOfDay::from_minutes_of_day(wrap_minutes_of_day(
                e.iftar_minutes_of_day() as i32 + self.config.iftar_offset_min as i32,
            ))
        })
    }

    /// The day's schedule plus tomorrow's Sehri/Iftar as ordered display
    /// rows, for the LCD and web UI.
    pub fn upcoming_schedule(&self) -> Vec<ScheduleEntry, 8> {
        let mut rows: Vec<ScheduleEntry, 8> = Vec::new();

        if self.current_date.is_some() {
            let mut push_today = |slot: AlarmSlot, minutes: u16| {
                let _ = rows.push(ScheduleEntry {
                    bucket: DayBucket::Today,
                    slot,
                    time: TimeOfDay::from_minutes_of_day(minutes),
                });
            };

            if self.today.has_sehri {
                push_today(AlarmSlot::Sehri, self.today.sehri_minutes);
            }
            push_today(AlarmSlot::Fajr, self.today.prayers[0].minutes);
            push_today(AlarmSlot::Zohr, self.today.prayers[1].minutes);
            push_today(AlarmSlot::Asr, self.today.prayers[2].minutes);
            if self.today.has_iftar {
                push_today(AlarmSlot::Iftar, self.today.iftar_minutes);
            }
            push_today(AlarmSlot::Isha, self.today.prayers[3].minutes);
        }

        if let Some(time) = self.tomorrow_sehri_time() {
            let _ = rows.push(ScheduleEntry {
                bucket: DayBucket::Tomorrow,
                slot: AlarmSlot::Sehri,
                time,
            });
        }
        if let Some(time) = self.tomorrow_iftar_time() {
            let _ = rows.push(ScheduleEntry {
                bucket: DayBucket::Tomorrow,
                slot: AlarmSlot::Iftar,
                time,
            });
        }

        rows
    }

    /// Records the start of an alarm ring against a caller-supplied
    /// monotonic millisecond counter.
    pub fn start_alarm_duration_tracking(&mut self, now_ms: u64) {
        self.alarm_started_ms = Some(now_ms);
    }

    /// Records the end of an alarm ring. No-op if tracking was not started.
    pub fn stop_alarm_duration_tracking(&mut self, now_ms: u64) {
        if let Some(started) = self.alarm_started_ms.take() {
            self.last_alarm_duration_secs = Some((now_ms.saturating_sub(started) / 1000) as u32);
        }
    }

    /// Seconds the last alarm rang for, if one has completed.
    pub fn last_alarm_duration_secs(&self) -> Option<u32> {
        self.last_alarm_duration_secs
    }

    /// Display string for the last alarm duration, `"--"` if none yet.
    pub fn last_alarm_duration_string(&self) -> String<16> {
        let mut s = String::new();
        match self.last_alarm_duration_secs {
            Some(secs) => {
                let _ = write!(s, "{}m {}s", secs / 60, secs % 60);
            }
            None => {
                let _ = s.push_str("--");
            }
        }
        s
    }

    fn load_day(&mut self, date: Date) {
        self.today = DailyAlarms::empty();

        if let Some(entry) = timetable::lookup(self.timetable, date) {
            self.today.has_sehri = true;
            self.today.sehri_minutes = wrap_minutes_of_day(
                entry.sehri_minutes_of_day() as i32 + self.config.sehri_offset_min as i32,
            );
            self.today.has_iftar = true;
            self.today.iftar_minutes = wrap_minutes_of_day(
                entry.iftar_minutes_of_day() as i32 + self.config.iftar_offset_min as i32,
            );
        }

        // Prayer alarms apply every day, timetable entry or not.
        for (slot, (prayer, minutes)) in self.today.prayers.iter_mut().zip(PRAYER_TIMES) {
            slot.prayer = prayer;
            slot.minutes = minutes;
        }

        self.current_date = Some(date);
    }

    /// Latches every alarm whose minute has strictly passed. Runs every
    /// tick; within the alarm's own minute the latch is left to
    /// `check_trigger`.
    fn catch_up(&mut self, time: TimeOfDay) {
        let now_min = time.minutes_of_day();

        if self.today.has_sehri {
            if !self.today.pre_sehri_triggered && now_min > self.pre_sehri_minutes() {
                self.today.pre_sehri_triggered = true;
            }
            if now_min > self.today.sehri_minutes {
                self.today.sehri_triggered = true;
                self.today.sehri_end_triggered = true;
            }
        }
        if self.today.has_iftar && now_min > self.today.iftar_minutes {
            self.today.iftar_triggered = true;
        }
        for slot in self.today.prayers.iter_mut() {
            if !slot.triggered && now_min > slot.minutes {
                slot.triggered = true;
            }
        }
    }

    fn pre_sehri_minutes(&self) -> u16 {
        wrap_minutes_of_day(
            self.today.sehri_minutes as i32 - self.config.pre_sehri_lead_min as i32,
        )
    }

    fn tomorrow_entry(&self) -> Option<&TimetableEntry> {
        let date = self.current_date?;
        let idx = timetable::position(self.timetable, date)?;
        self.timetable.get(idx + 1)
    }
}

/// Formats an optional time as `HH:MM`, with `"--:--"` as the sentinel.
fn format_time(time: Option<TimeOfDay>) -> String<8> {
    let mut s = String::new();
    match time {
        Some(t) => {
            let _ = write!(s, "{t}");
        }
        None => {
            let _ = s.push_str("--:--");
        }
    }
    s
}
