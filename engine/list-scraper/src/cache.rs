use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;
use upgrade_core::RankingEntry;

/// One day's scrape of the rankings list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSnapshot {
    /// Calendar day the snapshot was taken (YYYY-MM-DD)
    pub date: String,
    /// Article the rankings were scraped from
    pub source_url: String,
    /// Ranking rows, best rank first
    pub entries: Vec<RankingEntry>,
}

/// Cache file path for a given day
pub fn path_for(cache_dir: &Path, date: &str) -> PathBuf {
    cache_dir.join(format!("the-list-{date}.json"))
}

/// Load a snapshot if the file exists and parses.
///
/// An unreadable or stale-format file is treated as a miss so the caller
/// falls back to a fresh scrape.
pub fn load(path: &Path) -> Option<ListSnapshot> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("Ignoring unreadable rankings cache {:?}: {}", path, e);
            None
        }
    }
}

/// Write a snapshot through a temp file and rename.
///
/// Cache-write failures only cost a re-scrape tomorrow, so they are
/// logged rather than propagated.
pub fn store(path: &Path, snapshot: &ListSnapshot) {
    let json = match serde_json::to_string_pretty(snapshot) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to encode rankings cache: {}", e);
            return;
        }
    };

    let tmp = path.with_extension("json.tmp");
    if let Err(e) = fs::write(&tmp, json) {
        warn!("Failed to write rankings cache {:?}: {}", tmp, e);
        return;
    }
    if let Err(e) = fs::rename(&tmp, path) {
        warn!("Failed to swap rankings cache into place {:?}: {}", path, e);
    }
}
