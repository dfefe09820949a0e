//! File-backed reached-out flags.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use coffeechat_core::ReachedOutStore;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

/// Match ids the user proposed a time for, persisted as a JSON array.
#[derive(Debug)]
pub struct FileReachedOutStore {
    match_ids: BTreeSet<String>,
    path: PathBuf,
}

impl FileReachedOutStore {
    /// Loads flags from `path`, falling back to an empty set when the file is
    /// missing or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let match_ids = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<BTreeSet<String>>(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring unreadable reached-out store");
                BTreeSet::new()
            }),
            Err(_) => BTreeSet::new(),
        };
        debug!(path = %path.display(), count = match_ids.len(), "loaded reached-out store");
        Self { match_ids, path }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records that the user reached out for `match_id`.
    ///
    /// Returns `false` if it was already recorded; the file is only written
    /// when the set changes.
    pub fn mark(&mut self, match_id: impl Into<String>) -> ClientResult<bool> {
        if !self.match_ids.insert(match_id.into()) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.match_ids)
            .map_err(|e| ClientError::Store(format!("failed to encode flags: {}", e)))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl ReachedOutStore for FileReachedOutStore {
    fn has_reached_out(&self, match_id: &str) -> bool {
        self.match_ids.contains(match_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileReachedOutStore::load(dir.path().join("flags.json"));
        assert!(!store.has_reached_out("m-1"));
    }

    #[test]
    fn mark_persists_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("flags.json");

        let mut store = FileReachedOutStore::load(&path);
        assert!(store.mark("m-1").unwrap());
        assert!(!store.mark("m-1").unwrap());
        assert!(store.has_reached_out("m-1"));

        let reloaded = FileReachedOutStore::load(&path);
        assert!(reloaded.has_reached_out("m-1"));
        assert!(!reloaded.has_reached_out("m-2"));
    }

    #[test]
    fn corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flags.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = FileReachedOutStore::load(&path);
        assert!(!store.has_reached_out("m-1"));
    }
}
