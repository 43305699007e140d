use chrono::{DateTime, NaiveDateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use warden_types::{WardenError, WardenResult};

const SNAPSHOT_PREFIX: &str = "snapshot-";
const SNAPSHOT_SUFFIX: &str = ".json";
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.3fZ";
const PARSE_FORMAT: &str = "%Y%m%dT%H%M%S%.fZ";

pub fn snapshot_file_name(taken_at: DateTime<Utc>) -> String {
    format!(
        "{}{}{}",
        SNAPSHOT_PREFIX,
        taken_at.format(TIMESTAMP_FORMAT),
        SNAPSHOT_SUFFIX
    )
}

pub fn parse_snapshot_file_name(name: &str) -> Option<DateTime<Utc>> {
    let stamp = name.strip_prefix(SNAPSHOT_PREFIX)?.strip_suffix(SNAPSHOT_SUFFIX)?;
    NaiveDateTime::parse_from_str(stamp, PARSE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// A snapshot survives if it is among the `keep` newest or younger than
/// `max_age`; everything else is returned for deletion.
pub fn select_for_pruning(
    snapshots: &[(PathBuf, DateTime<Utc>)],
    keep: usize,
    max_age: chrono::Duration,
    now: DateTime<Utc>,
) -> Vec<PathBuf> {
    let mut ordered: Vec<&(PathBuf, DateTime<Utc>)> = snapshots.iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1));

    ordered
        .into_iter()
        .enumerate()
        .filter(|(rank, (_, taken_at))| {
            *rank >= keep && now.signed_duration_since(*taken_at) > max_age
        })
        .map(|(_, (path, _))| path.clone())
        .collect()
}

pub fn list_snapshots(dir: &Path) -> WardenResult<Vec<(PathBuf, DateTime<Utc>)>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| WardenError::Diagnostics(format!("Failed to list {:?}: {}", dir, e)))?;

    Ok(entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name();
            parse_snapshot_file_name(&name.to_string_lossy()).map(|ts| (entry.path(), ts))
        })
        .collect())
}

pub fn prune_snapshots(
    dir: &Path,
    keep: usize,
    max_age: chrono::Duration,
    now: DateTime<Utc>,
) -> WardenResult<usize> {
    let snapshots = list_snapshots(dir)?;
    let doomed = select_for_pruning(&snapshots, keep, max_age, now);

    let mut removed = 0;
    for path in doomed {
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!("Pruned diagnostics snapshot {:?}", path);
                removed += 1;
            }
            Err(e) => warn!("Failed to prune {:?}: {}", path, e),
        }
    }
    Ok(removed)
}
