//! `coffeechat status`: resolve and print the status of each match.

use std::path::Path;

use chrono::{DateTime, Utc};
use coffeechat_core::{
    ChatStatus, MatchRecord, ReachedOutStore, ResolverOptions, StatusFormatter, StatusLine,
    StatusResolver,
};
use serde::Serialize;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::store::FileReachedOutStore;

/// One resolved match, as printed by `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub match_id: String,
    pub status: ChatStatus,
    pub display: StatusLine,
}

/// Reads a JSON array of match records.
pub fn load_matches(path: &Path) -> ClientResult<Vec<MatchRecord>> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| ClientError::Input(format!("{}: {}", path.display(), e)))
}

/// Resolves every record against the same `now`.
pub fn build_reports<S: ReachedOutStore>(
    records: &[MatchRecord],
    resolver: &StatusResolver<S>,
    now: DateTime<Utc>,
) -> Vec<StatusReport> {
    let formatter = StatusFormatter::new(resolver.options().timezone);
    resolver
        .resolve_all(records, now)
        .into_iter()
        .map(|(record, status)| StatusReport {
            match_id: record.id.clone(),
            display: formatter.describe(&status, now),
            status,
        })
        .collect()
}

/// Renders one line per report.
pub fn render_text(reports: &[StatusReport]) -> String {
    if reports.is_empty() {
        return "No matches".to_string();
    }
    reports
        .iter()
        .map(|report| {
            let line = &report.display;
            let marker = if line.upcoming { "*" } else { " " };
            match &line.detail {
                Some(detail) => format!("{marker} {}: {} - {}", report.match_id, line.headline, detail),
                None => format!("{marker} {}: {}", report.match_id, line.headline),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs the command.
pub fn run(
    matches: &Path,
    json: bool,
    store_path: &Path,
    options: ResolverOptions,
    now: DateTime<Utc>,
) -> ClientResult<()> {
    let records = load_matches(matches)?;
    debug!(count = records.len(), %now, "resolving match statuses");

    let resolver = StatusResolver::new(options, FileReachedOutStore::load(store_path));
    let reports = build_reports(&records, &resolver, now);

    if json {
        let output = serde_json::to_string_pretty(&reports)
            .map_err(|e| ClientError::Input(format!("failed to encode output: {}", e)))?;
        println!("{}", output);
    } else {
        println!("{}", render_text(&reports));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;
    use coffeechat_core::InMemoryReachedOut;

    fn ny(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        New_York
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    const MATCHES: &str = r#"[
        {
            "id": "m-1",
            "status": "active",
            "created_at": "2025-02-24T15:00:00Z",
            "peer": { "id": "u-1", "name": "Alex" },
            "chosen_slot": { "day": "Wednesday", "time": 14 }
        },
        {
            "id": "m-2",
            "status": "proposed",
            "created_at": "2025-03-01T15:00:00Z",
            "peer": { "id": "u-2", "name": "Sam" }
        },
        {
            "id": "m-3",
            "status": "inactive",
            "created_at": "2025-01-01T15:00:00Z",
            "peer": { "id": "u-3", "name": "Riley" }
        }
    ]"#;

    fn reports_at(now: DateTime<Utc>) -> Vec<StatusReport> {
        let records: Vec<MatchRecord> = serde_json::from_str(MATCHES).unwrap();
        let store: InMemoryReachedOut = ["m-2"].into_iter().collect();
        let resolver = StatusResolver::new(ResolverOptions::new(New_York), store);
        build_reports(&records, &resolver, now)
    }

    #[test]
    fn text_output() {
        let text = render_text(&reports_at(ny(2025, 3, 4, 9, 0)));
        assert_eq!(
            text,
            "* m-1: Chat with Alex - Tomorrow at 2:00 PM EST\n  \
             m-2: Waiting on Sam - You proposed a time\n  \
             m-3: Finished"
        );
    }

    #[test]
    fn json_output_carries_status_and_display() {
        let reports = reports_at(ny(2025, 3, 3, 9, 0));
        let json = serde_json::to_value(&reports).unwrap();
        assert_eq!(json[0]["match_id"], "m-1");
        assert_eq!(json[0]["status"]["status"], "chat_scheduled");
        assert_eq!(json[0]["status"]["at"], "2025-03-05T19:00:00Z");
        assert_eq!(json[0]["display"]["upcoming"], false);
        assert_eq!(json[1]["status"]["peer"]["name"], "Sam");
    }

    #[test]
    fn empty_list() {
        assert_eq!(render_text(&[]), "No matches");
    }

    #[test]
    fn load_matches_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.json");
        std::fs::write(&path, "[{").unwrap();
        assert!(matches!(load_matches(&path), Err(ClientError::Input(_))));

        std::fs::write(&path, MATCHES).unwrap();
        assert_eq!(load_matches(&path).unwrap().len(), 3);
    }
}
