//! Resolver configuration.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Reference timezone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Days a freshly created match may sit without a proposal before it is
/// shown as having no responses.
pub const DEFAULT_NO_RESPONSE_AFTER_DAYS: i64 = 3;

/// What the status resolver returns for inputs it cannot classify.
///
/// Both policies log the anomaly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownStatusPolicy {
    /// Return [`ChatStatus::AnomalyDetected`](crate::status::ChatStatus::AnomalyDetected)
    /// and let the presentation layer choose the fallback text.
    #[default]
    Surface,
    /// Quietly return the legacy fallback status (Planning for an unknown
    /// backend status, Finished for an active match without a slot).
    Fallback,
}

/// Options threaded through every status resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Timezone in which weekly slots are interpreted.
    pub timezone: Tz,

    /// Threshold for [`ChatStatus::NoResponses`](crate::status::ChatStatus::NoResponses).
    pub no_response_after_days: i64,

    /// Handling of unknown backend statuses and missing slots.
    pub unknown_status: UnknownStatusPolicy,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            no_response_after_days: DEFAULT_NO_RESPONSE_AFTER_DAYS,
            unknown_status: UnknownStatusPolicy::default(),
        }
    }
}

impl ResolverOptions {
    /// Creates options for the given timezone.
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            ..Default::default()
        }
    }

    /// Builder: set the no-response threshold.
    pub fn with_no_response_after_days(mut self, days: i64) -> Self {
        self.no_response_after_days = days;
        self
    }

    /// Builder: set the unknown status policy.
    pub fn with_unknown_status(mut self, policy: UnknownStatusPolicy) -> Self {
        self.unknown_status = policy;
        self
    }
}

/// Parses an IANA timezone identifier.
///
/// # Errors
///
/// Returns [`CoreError::UnknownTimezone`] if the name is not in the tz database.
pub fn parse_timezone(name: &str) -> CoreResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| CoreError::unknown_timezone(name))
}
