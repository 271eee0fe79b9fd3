//! Snapshot persistence.
//!
//! The whole planner state round-trips through one JSON file: week offset,
//! palette templates, scheduled blocks, and the saved list. A missing or
//! malformed file is never fatal; it loads as the default empty state.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::models::block::ScheduledBlock;
use crate::models::template::ActivityTemplate;

const SNAPSHOT_FILE: &str = "planner_state.json";

/// Everything the planner persists between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSnapshot {
    pub week_offset: i64,
    pub created_blocks: Vec<ActivityTemplate>,
    pub scheduled_blocks: Vec<ScheduledBlock>,
    pub saved_list_blocks: Vec<ActivityTemplate>,
}

/// Default snapshot location under the platform data directory.
pub fn default_snapshot_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "timeblocks").map(|dirs| dirs.data_dir().join(SNAPSHOT_FILE))
}

/// Load the snapshot from disk.
///
/// A missing file or one that fails to parse yields the default snapshot;
/// only an unreadable existing file is reported as an error.
pub fn load_snapshot(path: &Path) -> Result<PlannerSnapshot> {
    if !path.exists() {
        return Ok(PlannerSnapshot::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read planner state from {}", path.display()))?;
    match serde_json::from_str(&data) {
        Ok(snapshot) => Ok(snapshot),
        Err(err) => {
            log::warn!(
                "Malformed planner state in {}; starting empty: {}",
                path.display(),
                err
            );
            Ok(PlannerSnapshot::default())
        }
    }
}

pub fn save_snapshot(path: &Path, snapshot: &PlannerSnapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write planner state to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = load_snapshot(&dir.path().join("nope.json")).unwrap();
        assert_eq!(snapshot, PlannerSnapshot::default());
    }

    #[test]
    fn test_malformed_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE);
        fs::write(&path, "{ this is not json").unwrap();
        let snapshot = load_snapshot(&path).unwrap();
        assert_eq!(snapshot, PlannerSnapshot::default());
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE);
        fs::write(&path, r#"{"week_offset": 3}"#).unwrap();
        let snapshot = load_snapshot(&path).unwrap();
        assert_eq!(snapshot.week_offset, 3);
        assert!(snapshot.scheduled_blocks.is_empty());
    }
}
