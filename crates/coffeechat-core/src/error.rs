//! Core error types.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while validating schedule and configuration input.
///
/// Resolution itself never fails: an empty schedule yields `None` and an
/// unknown backend status is carried as data, not as an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Time of day outside `[0, 24)` or not on a half-hour boundary.
    #[error("invalid time of day: {value} (expected a multiple of 0.5 in [0, 24))")]
    InvalidTimeOfDay { value: f64 },

    /// Weekday name that does not match any day.
    #[error("unknown weekday: {name}")]
    UnknownWeekday { name: String },

    /// Slot text that is not of the form `day@hh:mm`.
    #[error("malformed availability slot: {input}")]
    MalformedSlot { input: String },

    /// Timezone identifier that is not in the IANA database.
    #[error("unknown timezone: {name}")]
    UnknownTimezone { name: String },
}

impl CoreError {
    /// Creates an invalid time of day error.
    pub fn invalid_time_of_day(value: f64) -> Self {
        Self::InvalidTimeOfDay { value }
    }

    /// Creates an unknown weekday error.
    pub fn unknown_weekday(name: impl Into<String>) -> Self {
        Self::UnknownWeekday { name: name.into() }
    }

    /// Creates a malformed slot error.
    pub fn malformed_slot(input: impl Into<String>) -> Self {
        Self::MalformedSlot {
            input: input.into(),
        }
    }

    /// Creates an unknown timezone error.
    pub fn unknown_timezone(name: impl Into<String>) -> Self {
        Self::UnknownTimezone { name: name.into() }
    }
}
