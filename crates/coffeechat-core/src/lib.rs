//! Core types: weekly schedules, slot resolution, match status, formatting

pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod matching;
pub mod occurrence;
pub mod schedule;
pub mod status;
pub mod tracing;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    DEFAULT_NO_RESPONSE_AFTER_DAYS, DEFAULT_TIMEZONE, ResolverOptions, UnknownStatusPolicy,
    parse_timezone,
};
pub use error::{CoreError, CoreResult};
pub use format::{StatusFormatter, StatusLine, format_instant, format_time};
pub use matching::{BackendStatus, MatchRecord, Peer};
pub use occurrence::{
    has_elapsed, is_within_next_calendar_day, most_recent_occurrence, next_occurrence,
    resolve_next,
};
pub use schedule::{AvailabilitySlot, TimeOfDay, WeekDay, WeeklySchedule};
pub use status::{
    ChatStatus, InMemoryReachedOut, ReachedOutStore, StatusAnomaly, StatusResolver, resolve_status,
};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
