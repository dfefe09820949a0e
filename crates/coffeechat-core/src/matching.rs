//! Match records as supplied by the matching backend.
//!
//! This module provides:
//! - [`MatchRecord`]: a pairing between the current user and a peer
//! - [`BackendStatus`]: the backend lifecycle state of a match
//! - [`Peer`]: the other participant

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::AvailabilitySlot;

/// The other participant of a match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Peer {
    /// Backend identifier of the peer.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Peer {
    /// Creates a new peer.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Lifecycle state of a match, owned by the backend.
///
/// Values the client does not know are kept verbatim in
/// [`BackendStatus::Unrecognized`] so they can be reported instead of
/// failing deserialization of the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BackendStatus {
    /// Matched, nobody has proposed a time yet.
    Created,
    /// One side proposed a time.
    Proposed,
    /// Both sides agreed on a slot.
    Active,
    /// One side cancelled.
    Cancelled,
    /// The match ran its course.
    Inactive,
    /// Any value outside the known set.
    Unrecognized(String),
}

impl BackendStatus {
    /// Returns the wire value.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "created",
            Self::Proposed => "proposed",
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Inactive => "inactive",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Returns true if the value is one of the known lifecycle states.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for BackendStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "created" => Self::Created,
            "proposed" => Self::Proposed,
            "active" => Self::Active,
            "cancelled" => Self::Cancelled,
            "inactive" => Self::Inactive,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<&str> for BackendStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<BackendStatus> for String {
    fn from(status: BackendStatus) -> Self {
        match status {
            BackendStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pairing between the current user and a peer.
///
/// Created and mutated only by the backend; the client reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Backend identifier of the match.
    pub id: String,
    /// Lifecycle state.
    pub status: BackendStatus,
    /// When the backend created the match.
    pub created_at: DateTime<Utc>,
    /// The other participant.
    pub peer: Peer,
    /// The agreed weekly slot, present once the match is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen_slot: Option<AvailabilitySlot>,
}

impl MatchRecord {
    /// Creates a new MatchRecord without a chosen slot.
    pub fn new(
        id: impl Into<String>,
        status: impl Into<BackendStatus>,
        created_at: DateTime<Utc>,
        peer: Peer,
    ) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
            created_at,
            peer,
            chosen_slot: None,
        }
    }

    /// Builder method to set the chosen slot.
    pub fn with_chosen_slot(mut self, slot: AvailabilitySlot) -> Self {
        self.chosen_slot = Some(slot);
        self
    }

    /// Whole days elapsed between creation and `now`.
    ///
    /// Counts complete 24 hour periods; negative if `now` precedes creation.
    pub fn days_since_creation(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{TimeOfDay, WeekDay};
    use chrono::{Duration, TimeZone};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    mod backend_status {
        use super::*;

        #[test]
        fn known_values_round_trip_through_strings() {
            for raw in ["created", "proposed", "active", "cancelled", "inactive"] {
                let status = BackendStatus::from(raw);
                assert!(status.is_recognized());
                assert_eq!(status.as_str(), raw);
                assert_eq!(String::from(status), raw);
            }
        }

        #[test]
        fn unknown_value_is_preserved() {
            let status = BackendStatus::from("paused");
            assert_eq!(status, BackendStatus::Unrecognized("paused".to_string()));
            assert!(!status.is_recognized());
            assert_eq!(status.to_string(), "paused");
        }

        #[test]
        fn matching_is_case_sensitive() {
            assert!(!BackendStatus::from("Active").is_recognized());
        }
    }

    mod match_record {
        use super::*;

        #[test]
        fn deserializes_backend_payload() {
            let json = r#"{
                "id": "m-42",
                "status": "active",
                "created_at": "2025-03-01T15:00:00Z",
                "peer": { "id": "u-7", "name": "Alex" },
                "chosen_slot": { "day": "Wednesday", "time": 14 }
            }"#;
            let record: MatchRecord = serde_json::from_str(json).unwrap();
            assert_eq!(record.id, "m-42");
            assert_eq!(record.status, BackendStatus::Active);
            assert_eq!(record.created_at, utc(2025, 3, 1, 15, 0, 0));
            assert_eq!(record.peer, Peer::new("u-7", "Alex"));
            assert_eq!(
                record.chosen_slot,
                Some(AvailabilitySlot::new(
                    WeekDay::Wednesday,
                    TimeOfDay::from_hm(14, 0).unwrap()
                ))
            );
        }

        #[test]
        fn unknown_status_does_not_fail_deserialization() {
            let json = r#"{
                "id": "m-1",
                "status": "archived",
                "created_at": "2025-03-01T15:00:00Z",
                "peer": { "id": "u-1", "name": "Sam" }
            }"#;
            let record: MatchRecord = serde_json::from_str(json).unwrap();
            assert_eq!(record.status, BackendStatus::Unrecognized("archived".into()));
            assert_eq!(record.chosen_slot, None);
        }

        #[test]
        fn days_since_creation_counts_whole_days() {
            let created = utc(2025, 3, 1, 15, 0, 0);
            let record = MatchRecord::new("m-1", "created", created, Peer::new("u-1", "Sam"));
            assert_eq!(record.days_since_creation(created), 0);
            assert_eq!(
                record.days_since_creation(created + Duration::days(3) - Duration::seconds(1)),
                2
            );
            assert_eq!(record.days_since_creation(created + Duration::days(3)), 3);
            assert_eq!(record.days_since_creation(created - Duration::days(1)), -1);
        }
    }
}
