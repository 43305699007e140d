mod collector;
mod retention;
mod types;

pub use collector::{DiagnosticsCollector, FsDiagnosticsCollector};
pub use retention::{
    list_snapshots, parse_snapshot_file_name, prune_snapshots, select_for_pruning,
    snapshot_file_name,
};
pub use types::{
    DiagnosticsSnapshot, DiskUsage, HostResources, ProcessEntry, SnapshotContext, SnapshotRef,
};

#[cfg(test)]
mod tests;
