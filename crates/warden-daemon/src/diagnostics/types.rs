use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use warden_types::{HealthClassification, ProbeResult};

#[derive(Clone, Debug)]
pub struct SnapshotContext {
    pub service: String,
    pub classification: HealthClassification,
    pub results: Vec<ProbeResult>,
    pub taken_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotRef {
    pub path: PathBuf,
    pub taken_at: DateTime<Utc>,
    pub pruned: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiagnosticsSnapshot {
    pub service: String,
    pub host: Option<String>,
    pub taken_at: DateTime<Utc>,
    pub classification: HealthClassification,
    pub probe_results: Vec<ProbeResult>,
    pub resources: Option<HostResources>,
    pub processes: Vec<ProcessEntry>,
    pub log_tail: Vec<String>,
    pub errors: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HostResources {
    pub total_memory_bytes: u64,
    pub used_memory_bytes: u64,
    pub total_swap_bytes: u64,
    pub used_swap_bytes: u64,
    pub load_average: [f64; 3],
    pub cpu_count: usize,
    pub disks: Vec<DiskUsage>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiskUsage {
    pub mount_point: PathBuf,
    pub total_bytes: u64,
    pub available_bytes: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
    pub memory_bytes: u64,
    pub cpu_percent: f32,
    pub status: String,
}
