//! `coffeechat reach-out`: record that the user proposed a time.

use std::path::Path;

use tracing::info;

use crate::error::ClientResult;
use crate::store::FileReachedOutStore;

/// Runs the command.
pub fn run(match_id: &str, store_path: &Path) -> ClientResult<()> {
    let mut store = FileReachedOutStore::load(store_path);
    if store.mark(match_id)? {
        info!(match_id, path = %store.path().display(), "recorded reach-out");
        println!("Recorded that you reached out for {}.", match_id);
    } else {
        println!("Already recorded for {}.", match_id);
    }
    Ok(())
}
