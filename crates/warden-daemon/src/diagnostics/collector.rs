use async_trait::async_trait;
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use sysinfo::{Disks, System};
use tracing::{debug, info};
use warden_types::{WardenError, WardenResult};

use super::retention::{prune_snapshots, snapshot_file_name};
use super::types::{
    DiagnosticsSnapshot, DiskUsage, HostResources, ProcessEntry, SnapshotContext, SnapshotRef,
};
use crate::command::run_command;
use crate::config::DiagnosticsConfig;

// Log files are tailed from at most this many trailing bytes.
const LOG_TAIL_WINDOW_BYTES: u64 = 256 * 1024;

#[async_trait]
pub trait DiagnosticsCollector: Send + Sync {
    async fn collect(&self, context: &SnapshotContext) -> WardenResult<SnapshotRef>;
}

pub struct FsDiagnosticsCollector {
    dir: PathBuf,
    keep: usize,
    max_age: chrono::Duration,
    log_file: Option<PathBuf>,
    log_command: Option<Vec<String>>,
    log_tail_lines: usize,
    max_processes: usize,
    command_timeout: Duration,
}

impl FsDiagnosticsCollector {
    pub fn new(dir: PathBuf, config: &DiagnosticsConfig) -> Self {
        Self {
            dir,
            keep: config.keep_snapshots,
            max_age: config.max_age(),
            log_file: config.log_file.clone(),
            log_command: config.log_command.clone(),
            log_tail_lines: config.log_tail_lines,
            max_processes: config.max_processes,
            command_timeout: config.command_timeout(),
        }
    }

    async fn gather_log_tail(&self) -> Result<Vec<String>, String> {
        if let Some(ref path) = self.log_file {
            let path = path.clone();
            let lines = self.log_tail_lines;
            return tokio::task::spawn_blocking(move || tail_file(&path, lines))
                .await
                .map_err(|e| format!("log tail task failed: {}", e))?;
        }

        if let Some(ref command) = self.log_command {
            let output = run_command(command, &[], self.command_timeout)
                .await
                .map_err(|e| e.to_string())?;
            if !output.success() {
                return Err(format!(
                    "'{}' failed with {}",
                    command.join(" "),
                    output.describe_failure()
                ));
            }
            // `docker logs` and friends split output across both streams.
            let combined = format!("{}{}", output.stdout, output.stderr);
            return Ok(last_lines(&combined, self.log_tail_lines));
        }

        Ok(Vec::new())
    }

    fn write_snapshot(&self, snapshot: &DiagnosticsSnapshot) -> WardenResult<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            WardenError::Diagnostics(format!("Failed to create {:?}: {}", self.dir, e))
        })?;

        let path = self.dir.join(snapshot_file_name(snapshot.taken_at));
        let bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| WardenError::Serialization(format!("Failed to encode snapshot: {}", e)))?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| WardenError::Diagnostics(format!("Failed to create {:?}: {}", path, e)))?;
        file.write_all(&bytes)
            .map_err(|e| WardenError::Diagnostics(format!("Failed to write {:?}: {}", path, e)))?;

        Ok(path)
    }
}

#[async_trait]
impl DiagnosticsCollector for FsDiagnosticsCollector {
    async fn collect(&self, context: &SnapshotContext) -> WardenResult<SnapshotRef> {
        let mut errors = Vec::new();

        let max_processes = self.max_processes;
        let (resources, processes) =
            match tokio::task::spawn_blocking(move || host_snapshot(max_processes)).await {
                Ok((resources, processes)) => (Some(resources), processes),
                Err(e) => {
                    errors.push(format!("resource capture failed: {}", e));
                    (None, Vec::new())
                }
            };

        let log_tail = match self.gather_log_tail().await {
            Ok(lines) => lines,
            Err(e) => {
                errors.push(format!("log tail failed: {}", e));
                Vec::new()
            }
        };

        let snapshot = DiagnosticsSnapshot {
            service: context.service.clone(),
            host: System::host_name(),
            taken_at: context.taken_at,
            classification: context.classification,
            probe_results: context.results.clone(),
            resources,
            processes,
            log_tail,
            errors,
        };

        let path = self.write_snapshot(&snapshot)?;
        info!("Diagnostics snapshot written to {:?}", path);

        let pruned = prune_snapshots(&self.dir, self.keep, self.max_age, context.taken_at)?;
        if pruned > 0 {
            debug!("Pruned {} old diagnostics snapshots", pruned);
        }

        Ok(SnapshotRef {
            path,
            taken_at: context.taken_at,
            pruned,
        })
    }
}

fn host_snapshot(max_processes: usize) -> (HostResources, Vec<ProcessEntry>) {
    let mut sys = System::new();
    sys.refresh_memory();
    sys.refresh_cpu();
    sys.refresh_processes();

    let load = System::load_average();
    let disks = Disks::new_with_refreshed_list()
        .list()
        .iter()
        .map(|disk| DiskUsage {
            mount_point: disk.mount_point().to_path_buf(),
            total_bytes: disk.total_space(),
            available_bytes: disk.available_space(),
        })
        .collect();

    let resources = HostResources {
        total_memory_bytes: sys.total_memory(),
        used_memory_bytes: sys.used_memory(),
        total_swap_bytes: sys.total_swap(),
        used_swap_bytes: sys.used_swap(),
        load_average: [load.one, load.five, load.fifteen],
        cpu_count: sys.cpus().len(),
        disks,
    };

    let mut processes: Vec<ProcessEntry> = sys
        .processes()
        .values()
        .map(|process| ProcessEntry {
            pid: process.pid().as_u32(),
            name: process.name().to_string(),
            memory_bytes: process.memory(),
            cpu_percent: process.cpu_usage(),
            status: process.status().to_string(),
        })
        .collect();
    processes.sort_by(|a, b| b.memory_bytes.cmp(&a.memory_bytes));
    processes.truncate(max_processes);

    (resources, processes)
}

pub(crate) fn last_lines(text: &str, count: usize) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].iter().map(|l| l.to_string()).collect()
}

fn tail_file(path: &Path, count: usize) -> Result<Vec<String>, String> {
    let mut file = std::fs::File::open(path).map_err(|e| format!("open {:?}: {}", path, e))?;
    let len = file
        .metadata()
        .map_err(|e| format!("stat {:?}: {}", path, e))?
        .len();

    let start = len.saturating_sub(LOG_TAIL_WINDOW_BYTES);
    file.seek(SeekFrom::Start(start))
        .map_err(|e| format!("seek {:?}: {}", path, e))?;

    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .map_err(|e| format!("read {:?}: {}", path, e))?;

    let text = String::from_utf8_lossy(&buf);
    // The first line is probably cut when we started mid-file.
    let text = if start > 0 {
        text.split_once('\n').map(|(_, rest)| rest).unwrap_or("")
    } else {
        &text
    };
    Ok(last_lines(text, count))
}
