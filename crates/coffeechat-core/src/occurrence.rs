//! Resolution of recurring weekly slots into concrete instants.
//!
//! All calendar arithmetic happens on local dates in an explicit IANA
//! timezone, then converts to UTC. Adding days to a local date and attaching
//! the slot's wall-clock time keeps the meeting at the same local time across
//! daylight-saving transitions, which fixed-offset arithmetic would not.
//!
//! - [`resolve_next`] / [`next_occurrence`]: the next instant at or after now
//! - [`most_recent_occurrence`] / [`has_elapsed`]: whether this week's
//!   occurrence has already started
//! - [`is_within_next_calendar_day`]: today-or-tomorrow check on local dates

use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone,
    Utc,
};
use chrono_tz::Tz;
use tracing::trace;

use crate::schedule::{AvailabilitySlot, WeekDay, WeeklySchedule};

/// How many days past today the forward walk inspects (inclusive).
const LOOKAHEAD_DAYS: u64 = 7;

/// Returns the instant at which `slot` occurs on `date`, or `None` when
/// `date` is not the slot's weekday.
pub fn slot_instant_on(slot: &AvailabilitySlot, date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    if WeekDay::from(date.weekday()) != slot.day {
        return None;
    }
    Some(localize(date.and_time(slot.time.to_naive_time()), tz))
}

/// Maps a local wall-clock time to UTC.
///
/// Ambiguous times (clocks going back) take the earlier instant. Times inside
/// a gap (clocks going forward) are read with the offset in force before the
/// gap, which lands the same distance past the gap.
fn localize(naive: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let before_gap = tz
                .offset_from_utc_datetime(&(naive - Duration::days(1)))
                .fix();
            (naive - Duration::seconds(i64::from(before_gap.local_minus_utc()))).and_utc()
        }
    }
}

/// Returns the next occurrence of `slot` at or after `now`.
///
/// Walks forward from the local calendar day of `now` through the following
/// seven days. A candidate equal to `now` is accepted so a meeting starting
/// this very moment is not pushed to next week.
pub fn next_occurrence(slot: &AvailabilitySlot, now: DateTime<Utc>, tz: &Tz) -> Option<DateTime<Utc>> {
    let today = now.with_timezone(tz).date_naive();
    (0..=LOOKAHEAD_DAYS)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .filter_map(|date| slot_instant_on(slot, date, tz))
        .find(|candidate| *candidate >= now)
}

/// Returns the earliest next occurrence across all slots of `schedule`.
///
/// `None` means the schedule is empty.
pub fn resolve_next(schedule: &WeeklySchedule, now: DateTime<Utc>, tz: &Tz) -> Option<DateTime<Utc>> {
    let next = schedule
        .iter()
        .filter_map(|slot| next_occurrence(slot, now, tz))
        .min();
    trace!(slots = schedule.len(), ?next, "resolved next occurrence");
    next
}

/// Returns the most recent occurrence of `slot` at or before `now` within
/// the current week.
///
/// The walk goes backward from the local calendar day of `now` and stops at
/// the start of the week (Sunday). `None` means the slot's day is still
/// ahead this week, or it is today at a later time.
pub fn most_recent_occurrence(
    slot: &AvailabilitySlot,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Option<DateTime<Utc>> {
    let today = now.with_timezone(tz).date_naive();
    let days_into_week = u64::from(today.weekday().num_days_from_sunday());
    (0..=days_into_week)
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .filter_map(|date| slot_instant_on(slot, date, tz))
        .find(|candidate| *candidate <= now)
}

/// Returns true if this week's occurrence of `slot` started strictly before
/// `now`.
///
/// There is no stored meeting length, so a meeting counts as elapsed as soon
/// as its start time has passed.
pub fn has_elapsed(slot: &AvailabilitySlot, now: DateTime<Utc>, tz: &Tz) -> bool {
    most_recent_occurrence(slot, now, tz).is_some_and(|start| start < now)
}

/// Returns true if `instant` falls on the same local calendar date as `now`
/// or on the day after.
///
/// Dates are compared midnight to midnight in `tz`; this is not a rolling
/// 24 hour window.
pub fn is_within_next_calendar_day(instant: DateTime<Utc>, now: DateTime<Utc>, tz: &Tz) -> bool {
    let today = now.with_timezone(tz).date_naive();
    let day = instant.with_timezone(tz).date_naive();
    day == today || today.succ_opt() == Some(day)
}
