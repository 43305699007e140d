use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::constants::{
    DEFAULT_KEEP_SNAPSHOTS, DEFAULT_LOG_TAIL_LINES, DEFAULT_MAX_PROCESSES,
    DEFAULT_SNAPSHOT_MAX_AGE_HOURS,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub enabled: bool,
    pub dir: Option<PathBuf>,
    pub keep_snapshots: usize,
    pub max_age_hours: u64,
    pub log_file: Option<PathBuf>,
    pub log_command: Option<Vec<String>>,
    pub log_tail_lines: usize,
    pub max_processes: usize,
    pub command_timeout_secs: u64,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            keep_snapshots: DEFAULT_KEEP_SNAPSHOTS,
            max_age_hours: DEFAULT_SNAPSHOT_MAX_AGE_HOURS,
            log_file: None,
            log_command: None,
            log_tail_lines: DEFAULT_LOG_TAIL_LINES,
            max_processes: DEFAULT_MAX_PROCESSES,
            command_timeout_secs: 10,
        }
    }
}

impl DiagnosticsConfig {
    pub fn max_age(&self) -> chrono::Duration {
        chrono::Duration::hours(self.max_age_hours as i64)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}
