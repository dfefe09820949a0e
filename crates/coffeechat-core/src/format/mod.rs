//! Display formatting for resolved instants and chat statuses.
//!
//! Every string is rendered in one explicit reference timezone, so all users
//! see the same wall-clock time regardless of their device settings.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use coffeechat_core::format::format_instant;
//!
//! let at = Utc.with_ymd_and_hms(2025, 3, 5, 19, 0, 0).unwrap();
//! assert_eq!(
//!     format_instant(at, &chrono_tz::America::New_York),
//!     "Wednesday, 3/5 at 2:00 PM EST"
//! );
//! ```

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::occurrence::is_within_next_calendar_day;
use crate::status::{ChatStatus, StatusAnomaly};

/// `Wednesday, 3/5 at 2:00 PM EST`
const INSTANT_FORMAT: &str = "%A, %-m/%-d at %-I:%M %p %Z";

/// `2:00 PM EST`
const TIME_FORMAT: &str = "%-I:%M %p %Z";

/// Formats `instant` as `"<Weekday>, <M>/<D> at <h:mm> <AM|PM> <tz>"` in `tz`.
pub fn format_instant(instant: DateTime<Utc>, tz: &Tz) -> String {
    instant.with_timezone(tz).format(INSTANT_FORMAT).to_string()
}

/// Formats only the wall-clock time of `instant` in `tz`.
pub fn format_time(instant: DateTime<Utc>, tz: &Tz) -> String {
    instant.with_timezone(tz).format(TIME_FORMAT).to_string()
}

/// A display-ready description of a chat status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    /// Variant name, as in [`ChatStatus::kind`].
    pub kind: String,
    /// Short title.
    pub headline: String,
    /// Secondary line, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// True when a scheduled chat is today or tomorrow.
    pub upcoming: bool,
}

/// Turns [`ChatStatus`] values into [`StatusLine`]s.
///
/// This is the boundary that picks user-visible fallback text for
/// anomalies: an unrecognized backend status reads as planning, an active
/// match without a slot reads as finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFormatter {
    timezone: Tz,
}

impl StatusFormatter {
    /// Creates a formatter rendering times in `timezone`.
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Returns the reference timezone.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Describes `status` as seen at `now`.
    pub fn describe(&self, status: &ChatStatus, now: DateTime<Utc>) -> StatusLine {
        let line = |headline: String, detail: Option<String>| StatusLine {
            kind: status.kind().to_string(),
            headline,
            detail,
            upcoming: false,
        };

        match status {
            ChatStatus::Planning => planning(line),
            ChatStatus::NoResponses => line(
                "No responses".to_string(),
                Some("Nobody has proposed a time yet".to_string()),
            ),
            ChatStatus::WaitingOn { peer } => line(
                format!("Waiting on {peer}"),
                Some("You proposed a time".to_string()),
            ),
            ChatStatus::RespondingTo { peer } => line(
                format!("Respond to {peer}"),
                Some(format!("{peer} proposed a time")),
            ),
            ChatStatus::Finished => finished(line),
            ChatStatus::Cancelled { peer } => line(
                "Cancelled".to_string(),
                Some(format!("Your chat with {peer} was cancelled")),
            ),
            ChatStatus::ChatScheduled { peer, at } => {
                let upcoming = is_within_next_calendar_day(*at, now, &self.timezone);
                StatusLine {
                    upcoming,
                    ..line(format!("Chat with {peer}"), Some(self.when(*at, now, upcoming)))
                }
            }
            ChatStatus::AnomalyDetected { anomaly } => match anomaly {
                StatusAnomaly::UnrecognizedStatus { .. } => planning(line),
                StatusAnomaly::MissingChosenSlot => finished(line),
            },
        }
    }

    /// "Today at …" / "Tomorrow at …" inside the next calendar day, the full
    /// date otherwise.
    fn when(&self, at: DateTime<Utc>, now: DateTime<Utc>, upcoming: bool) -> String {
        if !upcoming {
            return format_instant(at, &self.timezone);
        }
        let same_day = at.with_timezone(&self.timezone).date_naive()
            == now.with_timezone(&self.timezone).date_naive();
        let day = if same_day { "Today" } else { "Tomorrow" };
        format!("{day} at {}", format_time(at, &self.timezone))
    }
}

fn planning(line: impl Fn(String, Option<String>) -> StatusLine) -> StatusLine {
    line(
        "Planning".to_string(),
        Some("Propose a time to meet".to_string()),
    )
}

fn finished(line: impl Fn(String, Option<String>) -> StatusLine) -> StatusLine {
    line("Finished".to_string(), None)
}


#[cfg(test)]
mod golden_tests;
