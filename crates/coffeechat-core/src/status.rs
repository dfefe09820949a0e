//! User-facing chat status derived from a match record.
//!
//! [`resolve_status`] is the state machine: it combines the backend
//! lifecycle state, the locally recorded "already reached out" flag and the
//! schedule computations from [`crate::occurrence`] into one [`ChatStatus`].
//! Nothing is cached; every call recomputes from its inputs.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::config::{ResolverOptions, UnknownStatusPolicy};
use crate::matching::{BackendStatus, MatchRecord, Peer};
use crate::occurrence::{has_elapsed, next_occurrence};

/// Read access to the "current user already proposed a time" flag.
///
/// The flag is written by the client when the user proposes a time; the
/// resolver only reads it.
pub trait ReachedOutStore {
    /// Returns true if the current user reached out for this match.
    fn has_reached_out(&self, match_id: &str) -> bool;
}

impl<F> ReachedOutStore for F
where
    F: Fn(&str) -> bool,
{
    fn has_reached_out(&self, match_id: &str) -> bool {
        self(match_id)
    }
}

/// In-memory set of match ids the user reached out for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryReachedOut {
    match_ids: HashSet<String>,
}

impl InMemoryReachedOut {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the user reached out for `match_id`.
    pub fn mark(&mut self, match_id: impl Into<String>) {
        self.match_ids.insert(match_id.into());
    }
}

impl<S: Into<String>> FromIterator<S> for InMemoryReachedOut {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            match_ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl ReachedOutStore for InMemoryReachedOut {
    fn has_reached_out(&self, match_id: &str) -> bool {
        self.match_ids.contains(match_id)
    }
}

/// Inputs the resolver could not classify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusAnomaly {
    /// The backend sent a lifecycle state outside the known set.
    UnrecognizedStatus { raw: String },
    /// The match is active but carries no chosen slot.
    MissingChosenSlot,
}

impl fmt::Display for StatusAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedStatus { raw } => write!(f, "unrecognized backend status {raw:?}"),
            Self::MissingChosenSlot => f.write_str("active match without a chosen slot"),
        }
    }
}

/// The closed set of statuses shown for a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChatStatus {
    /// Newly matched; nobody has proposed a time yet.
    Planning,
    /// Matched for a while and still nobody proposed a time.
    NoResponses,
    /// The current user proposed a time and waits for the peer.
    WaitingOn { peer: Peer },
    /// The peer proposed a time and waits for the current user.
    RespondingTo { peer: Peer },
    /// The chat happened, or the match is over.
    Finished,
    /// The match was cancelled.
    Cancelled { peer: Peer },
    /// A chat is coming up at `at`.
    ChatScheduled { peer: Peer, at: DateTime<Utc> },
    /// The inputs could not be classified.
    AnomalyDetected { anomaly: StatusAnomaly },
}

impl ChatStatus {
    /// Returns a stable snake_case name for the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::NoResponses => "no_responses",
            Self::WaitingOn { .. } => "waiting_on",
            Self::RespondingTo { .. } => "responding_to",
            Self::Finished => "finished",
            Self::Cancelled { .. } => "cancelled",
            Self::ChatScheduled { .. } => "chat_scheduled",
            Self::AnomalyDetected { .. } => "anomaly_detected",
        }
    }

    /// Returns the peer if the variant carries one.
    pub fn peer(&self) -> Option<&Peer> {
        match self {
            Self::WaitingOn { peer }
            | Self::RespondingTo { peer }
            | Self::Cancelled { peer }
            | Self::ChatScheduled { peer, .. } => Some(peer),
            _ => None,
        }
    }

    /// Returns the scheduled instant for [`ChatStatus::ChatScheduled`].
    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::ChatScheduled { at, .. } => Some(*at),
            _ => None,
        }
    }

    /// Returns true for [`ChatStatus::AnomalyDetected`].
    pub fn is_anomaly(&self) -> bool {
        matches!(self, Self::AnomalyDetected { .. })
    }
}

/// Derives the chat status of `record` at `now`.
///
/// The reached-out flag is read at most once, and only for proposed
/// matches. Anomalies are logged at warn level and then handled according
/// to `options.unknown_status`.
pub fn resolve_status<S>(
    record: &MatchRecord,
    reached_out: &S,
    now: DateTime<Utc>,
    options: &ResolverOptions,
) -> ChatStatus
where
    S: ReachedOutStore + ?Sized,
{
    let peer = || record.peer.clone();
    let status = match &record.status {
        BackendStatus::Created => {
            if record.days_since_creation(now) >= options.no_response_after_days {
                ChatStatus::NoResponses
            } else {
                ChatStatus::Planning
            }
        }
        BackendStatus::Proposed => {
            if reached_out.has_reached_out(&record.id) {
                ChatStatus::WaitingOn { peer: peer() }
            } else {
                ChatStatus::RespondingTo { peer: peer() }
            }
        }
        BackendStatus::Cancelled => ChatStatus::Cancelled { peer: peer() },
        BackendStatus::Active => match &record.chosen_slot {
            None => report_anomaly(
                record,
                StatusAnomaly::MissingChosenSlot,
                options,
                ChatStatus::Finished,
            ),
            Some(slot) if has_elapsed(slot, now, &options.timezone) => ChatStatus::Finished,
            Some(slot) => next_occurrence(slot, now, &options.timezone)
                .map_or(ChatStatus::Finished, |at| ChatStatus::ChatScheduled {
                    peer: peer(),
                    at,
                }),
        },
        BackendStatus::Inactive => ChatStatus::Finished,
        BackendStatus::Unrecognized(raw) => report_anomaly(
            record,
            StatusAnomaly::UnrecognizedStatus { raw: raw.clone() },
            options,
            ChatStatus::Planning,
        ),
    };

    debug!(
        match_id = %record.id,
        backend_status = %record.status,
        status = status.kind(),
        "resolved chat status"
    );
    status
}

fn report_anomaly(
    record: &MatchRecord,
    anomaly: StatusAnomaly,
    options: &ResolverOptions,
    fallback: ChatStatus,
) -> ChatStatus {
    warn!(match_id = %record.id, %anomaly, policy = ?options.unknown_status, "match status anomaly");
    match options.unknown_status {
        UnknownStatusPolicy::Surface => ChatStatus::AnomalyDetected { anomaly },
        UnknownStatusPolicy::Fallback => fallback,
    }
}

/// Resolves chat statuses against a fixed set of options and a reached-out
/// store.
#[derive(Debug, Clone)]
pub struct StatusResolver<S> {
    options: ResolverOptions,
    store: S,
}

impl<S: ReachedOutStore> StatusResolver<S> {
    /// Creates a resolver.
    pub fn new(options: ResolverOptions, store: S) -> Self {
        Self { options, store }
    }

    /// Returns the options in use.
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Returns the reached-out store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Derives the chat status of `record` at `now`.
    pub fn resolve(&self, record: &MatchRecord, now: DateTime<Utc>) -> ChatStatus {
        resolve_status(record, &self.store, now, &self.options)
    }

    /// Derives the chat status of `record` at the clock's current time.
    pub fn resolve_now(&self, record: &MatchRecord, clock: &dyn Clock) -> ChatStatus {
        self.resolve(record, clock.now())
    }

    /// Derives the status of every record against the same `now`.
    pub fn resolve_all<'a>(
        &self,
        records: &'a [MatchRecord],
        now: DateTime<Utc>,
    ) -> Vec<(&'a MatchRecord, ChatStatus)> {
        records
            .iter()
            .map(|record| (record, self.resolve(record, now)))
            .collect()
    }
}
