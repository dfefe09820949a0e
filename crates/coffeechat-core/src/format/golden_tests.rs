//! Golden tests for status presentation.
//!
//! These tests use insta inline snapshots to keep user-visible text stable.
//! Run with `cargo insta review` after intentional wording changes.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::America::New_York;

use crate::config::ResolverOptions;
use crate::format::StatusFormatter;
use crate::matching::{MatchRecord, Peer};
use crate::schedule::{AvailabilitySlot, TimeOfDay, WeekDay};
use crate::status::{ChatStatus, InMemoryReachedOut, StatusResolver};

/// Wall-clock time in New York, as UTC.
fn ny(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    New_York
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn jordan() -> Peer {
    Peer::new("u-3", "Jordan")
}

/// Resolve and describe a record the way a screen would.
fn describe(record: &MatchRecord, reached_out: &[&str], now: DateTime<Utc>) -> String {
    let store: InMemoryReachedOut = reached_out.iter().copied().collect();
    let resolver = StatusResolver::new(ResolverOptions::new(New_York), store);
    let status = resolver.resolve(record, now);
    let line = StatusFormatter::new(New_York).describe(&status, now);
    match line.detail {
        Some(detail) => format!("{} | {}", line.headline, detail),
        None => line.headline,
    }
}

fn record(status: &str) -> MatchRecord {
    MatchRecord::new("m-9", status, ny(2025, 3, 1, 10, 0), jordan())
}

fn active_wednesday_two_pm() -> MatchRecord {
    record("active").with_chosen_slot(AvailabilitySlot::new(
        WeekDay::Wednesday,
        TimeOfDay::from_hm(14, 0).unwrap(),
    ))
}

#[test]
fn created_recently() {
    let output = describe(&record("created"), &[], ny(2025, 3, 2, 10, 0));
    insta::assert_snapshot!(output, @"Planning | Propose a time to meet");
}

#[test]
fn created_long_ago() {
    let output = describe(&record("created"), &[], ny(2025, 3, 4, 10, 0));
    insta::assert_snapshot!(output, @"No responses | Nobody has proposed a time yet");
}

#[test]
fn proposed_by_me() {
    let output = describe(&record("proposed"), &["m-9"], ny(2025, 3, 2, 10, 0));
    insta::assert_snapshot!(output, @"Waiting on Jordan | You proposed a time");
}

#[test]
fn proposed_by_peer() {
    let output = describe(&record("proposed"), &[], ny(2025, 3, 2, 10, 0));
    insta::assert_snapshot!(output, @"Respond to Jordan | Jordan proposed a time");
}

#[test]
fn cancelled() {
    let output = describe(&record("cancelled"), &[], ny(2025, 3, 2, 10, 0));
    insta::assert_snapshot!(output, @"Cancelled | Your chat with Jordan was cancelled");
}

#[test]
fn scheduled_two_days_out() {
    let output = describe(&active_wednesday_two_pm(), &[], ny(2025, 3, 3, 9, 0));
    insta::assert_snapshot!(output, @"Chat with Jordan | Wednesday, 3/5 at 2:00 PM EST");
}

#[test]
fn scheduled_day_before() {
    let output = describe(&active_wednesday_two_pm(), &[], ny(2025, 3, 4, 21, 0));
    insta::assert_snapshot!(output, @"Chat with Jordan | Tomorrow at 2:00 PM EST");
}

#[test]
fn scheduled_elapsed() {
    let output = describe(&active_wednesday_two_pm(), &[], ny(2025, 3, 6, 10, 0));
    insta::assert_snapshot!(output, @"Finished");
}

#[test]
fn unknown_backend_status() {
    let output = describe(&record("on_hold"), &[], ny(2025, 3, 2, 10, 0));
    insta::assert_snapshot!(output, @"Planning | Propose a time to meet");
}

#[test]
fn scheduled_line_json() {
    let now = ny(2025, 3, 4, 21, 0);
    let status = ChatStatus::ChatScheduled {
        peer: jordan(),
        at: ny(2025, 3, 5, 14, 0),
    };
    let line = StatusFormatter::new(New_York).describe(&status, now);
    insta::assert_json_snapshot!(line, @r#"
    {
      "kind": "chat_scheduled",
      "headline": "Chat with Jordan",
      "detail": "Tomorrow at 2:00 PM EST",
      "upcoming": true
    }
    "#);
}

#[test]
fn finished_line_json() {
    let line = StatusFormatter::new(New_York).describe(&ChatStatus::Finished, ny(2025, 3, 4, 21, 0));
    insta::assert_json_snapshot!(line, @r#"
    {
      "kind": "finished",
      "headline": "Finished",
      "upcoming": false
    }
    "#);
}
