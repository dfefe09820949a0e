//! Weekly availability types.
//!
//! This module provides the recurring building blocks matches are scheduled
//! against:
//! - [`WeekDay`]: a day of the week, Sunday first
//! - [`TimeOfDay`]: a wall-clock time at half-hour granularity
//! - [`AvailabilitySlot`]: one recurring weekly window
//! - [`WeeklySchedule`]: a duplicate-free set of slots

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A day of the week.
///
/// Ordered Sunday..Saturday, which is also the start of the week used when
/// deciding whether a slot has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeekDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekDay {
    /// All days, Sunday first.
    pub const ALL: [WeekDay; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Returns the full English name of the day.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    /// Days since the start of the week (Sunday = 0).
    pub fn num_days_from_sunday(&self) -> u32 {
        self.to_chrono().num_days_from_sunday()
    }

    /// Converts to the equivalent `chrono` weekday.
    pub fn to_chrono(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
            Self::Tuesday => Weekday::Tue,
            Self::Wednesday => Weekday::Wed,
            Self::Thursday => Weekday::Thu,
            Self::Friday => Weekday::Fri,
            Self::Saturday => Weekday::Sat,
        }
    }
}

impl From<Weekday> for WeekDay {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sun => Self::Sunday,
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
        }
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WeekDay {
    type Err = CoreError;

    /// Accepts full names and three-letter abbreviations, case-insensitively.
    fn from_str(s: &str) -> CoreResult<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| {
                let name = day.name().to_ascii_lowercase();
                lower == name || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| CoreError::unknown_weekday(s))
    }
}

/// A wall-clock time of day at half-hour granularity.
///
/// Stored as the number of half hours since midnight (0..48). On the wire it
/// is a fractional hour: `14.5` means 2:30 PM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TimeOfDay(u8);

impl TimeOfDay {
    const HALF_HOURS_PER_DAY: u8 = 48;

    /// Creates a time from fractional hours (`14.5` = 14:30).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTimeOfDay`] unless `hours` is a multiple
    /// of 0.5 in `[0, 24)`.
    pub fn from_hours(hours: f64) -> CoreResult<Self> {
        let doubled = hours * 2.0;
        if !hours.is_finite() || !(0.0..24.0).contains(&hours) || doubled.fract() != 0.0 {
            return Err(CoreError::invalid_time_of_day(hours));
        }
        Ok(Self(doubled as u8))
    }

    /// Creates a time from an hour and a minute (0 or 30).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTimeOfDay`] for hours past 23 or minutes
    /// other than 0 and 30.
    pub fn from_hm(hour: u32, minute: u32) -> CoreResult<Self> {
        let hours = f64::from(hour) + f64::from(minute) / 60.0;
        if hour >= 24 || (minute != 0 && minute != 30) {
            return Err(CoreError::invalid_time_of_day(hours));
        }
        Ok(Self((hour * 2 + minute / 30) as u8))
    }

    /// Returns the time as fractional hours.
    pub fn as_hours(&self) -> f64 {
        f64::from(self.0) / 2.0
    }

    /// Returns the hour component (0..24).
    pub fn hour(&self) -> u32 {
        u32::from(self.0 / 2)
    }

    /// Returns the minute component (0 or 30).
    pub fn minute(&self) -> u32 {
        u32::from(self.0 % 2) * 30
    }

    /// Converts to a `chrono` naive time.
    pub fn to_naive_time(&self) -> NaiveTime {
        // hour < 24 and minute in {0, 30} by construction.
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }
}

impl TryFrom<f64> for TimeOfDay {
    type Error = CoreError;

    fn try_from(hours: f64) -> CoreResult<Self> {
        Self::from_hours(hours)
    }
}

impl From<TimeOfDay> for f64 {
    fn from(time: TimeOfDay) -> Self {
        time.as_hours()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = CoreError;

    /// Parses `hh:mm`, or fractional hours such as `14.5` or `9`.
    fn from_str(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        let invalid = || CoreError::malformed_slot(s);
        match s.split_once(':') {
            Some((h, m)) => {
                let hour = h.parse::<u32>().map_err(|_| invalid())?;
                let minute = m.parse::<u32>().map_err(|_| invalid())?;
                Self::from_hm(hour, minute)
            }
            None => Self::from_hours(s.parse::<f64>().map_err(|_| invalid())?),
        }
    }
}

/// One recurring weekly availability window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// Day of the week.
    pub day: WeekDay,
    /// Start time on that day.
    pub time: TimeOfDay,
}

impl AvailabilitySlot {
    /// Creates a new slot.
    pub fn new(day: WeekDay, time: TimeOfDay) -> Self {
        Self { day, time }
    }
}

impl fmt::Display for AvailabilitySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.day.name().to_ascii_lowercase(), self.time)
    }
}

impl FromStr for AvailabilitySlot {
    type Err = CoreError;

    /// Parses `day@time`, e.g. `wednesday@14:30` or `wed@14.5`.
    fn from_str(s: &str) -> CoreResult<Self> {
        let (day, time) = s
            .split_once('@')
            .ok_or_else(|| CoreError::malformed_slot(s))?;
        Ok(Self::new(day.parse()?, time.parse()?))
    }
}

/// A set of weekly availability slots without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    slots: BTreeSet<AvailabilitySlot>,
}

impl WeeklySchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a slot. Returns `false` if it was already present.
    pub fn insert(&mut self, slot: AvailabilitySlot) -> bool {
        self.slots.insert(slot)
    }

    /// Removes a slot. Returns `false` if it was not present.
    pub fn remove(&mut self, slot: &AvailabilitySlot) -> bool {
        self.slots.remove(slot)
    }

    /// Returns true if the slot is in the schedule.
    pub fn contains(&self, slot: &AvailabilitySlot) -> bool {
        self.slots.contains(slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates slots in week order.
    pub fn iter(&self) -> impl Iterator<Item = &AvailabilitySlot> {
        self.slots.iter()
    }
}

impl From<AvailabilitySlot> for WeeklySchedule {
    fn from(slot: AvailabilitySlot) -> Self {
        std::iter::once(slot).collect()
    }
}

impl FromIterator<AvailabilitySlot> for WeeklySchedule {
    fn from_iter<I: IntoIterator<Item = AvailabilitySlot>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}
