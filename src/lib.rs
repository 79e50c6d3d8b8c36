#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`AlarmScheduler`**: Owns the day's alarm latches and reports due alarms
//! - **`TimetableEntry`**: One day's Sehri/Iftar record in the static timetable
//! - **`AlarmTrigger`**: A latched alarm event, one variant per source event
//! - **`BuzzerSequencer`**: Drives a single sounder through timed ON/OFF patterns
//! - **`DebouncedButton`**: Integrates one noisy pin into a stable level plus events
//! - **`Buzzer` / `ButtonPin`**: Traits to implement for your output/input hardware
//! - **`TimeSource` / `WallClock`**: Traits to implement for monotonic and wall-clock time
//!
//! All three components are single-threaded and poll-driven: each exposes a
//! non-blocking `tick()` the control loop calls every iteration, and none of
//! them call into each other. The orchestrator composes them by reading
//! query methods and issuing start/stop commands.

pub mod button;
pub mod buzzer;
pub mod scheduler;
pub mod time;
pub mod timetable;
pub mod types;

pub use button::{ButtonEvent, ButtonPin, DebouncedButton, PinState};
pub use buzzer::{Buzzer, BuzzerPattern, BuzzerSequencer};
pub use scheduler::{AlarmScheduler, SchedulerConfig};
pub use time::{TimeDuration, TimeInstant, TimeSource, WallClock};
pub use timetable::{NAVSARI_1447, TimetableEntry, TimetableError};
pub use types::{
    AlarmSlot, AlarmTrigger, Date, DayBucket, Prayer, ScheduleEntry, TimeOfDay,
};
