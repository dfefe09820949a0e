//! `coffeechat next`: the next time matching a weekly availability.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use coffeechat_core::{AvailabilitySlot, WeeklySchedule, format_instant, resolve_next};

use crate::error::ClientResult;

/// Text printed when no slot was given.
pub const NO_AVAILABILITY: &str = "No availability";

/// Describes the next occurrence of `slots` after `now`.
pub fn describe_next(slots: &[AvailabilitySlot], now: DateTime<Utc>, tz: &Tz) -> String {
    let schedule: WeeklySchedule = slots.iter().copied().collect();
    match resolve_next(&schedule, now, tz) {
        Some(at) => format_instant(at, tz),
        None => NO_AVAILABILITY.to_string(),
    }
}

/// Runs the command.
pub fn run(slots: &[AvailabilitySlot], now: DateTime<Utc>, tz: &Tz) -> ClientResult<()> {
    println!("{}", describe_next(slots, now, tz));
    Ok(())
}
