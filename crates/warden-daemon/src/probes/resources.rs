use async_trait::async_trait;
use std::path::{Path, PathBuf};
use sysinfo::{Disks, System};
use tracing::warn;
use warden_types::{ProbeKind, ProbeResult};

use super::Probe;

/// Compares a usage percentage against its ceilings. At or above `critical`
/// the probe fails; at or above `warning` it passes with a warning detail.
pub fn evaluate_usage(
    name: &str,
    resource: &str,
    used_percent: f64,
    warning: f64,
    critical: f64,
) -> ProbeResult {
    let kind = ProbeKind::ResourceThreshold;
    if used_percent >= critical {
        ProbeResult::fail(
            name,
            kind,
            format!(
                "{} usage {:.1}% >= critical threshold {:.0}%",
                resource, used_percent, critical
            ),
        )
        .with_measurement(used_percent)
    } else if used_percent >= warning {
        warn!(
            "{}: {} usage {:.1}% above warning threshold {:.0}%",
            name, resource, used_percent, warning
        );
        ProbeResult::pass(name, kind)
            .with_measurement(used_percent)
            .with_detail(format!(
                "warning: {} usage {:.1}% >= {:.0}%",
                resource, used_percent, warning
            ))
    } else {
        ProbeResult::pass(name, kind).with_measurement(used_percent)
    }
}

fn used_percent(total: u64, available: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let used = total.saturating_sub(available);
    Some(used as f64 * 100.0 / total as f64)
}

pub struct DiskProbe {
    name: String,
    path: PathBuf,
    warning: f64,
    critical: f64,
}

impl DiskProbe {
    pub fn new(name: String, path: PathBuf, warning: f64, critical: f64) -> Self {
        Self { name, path, warning, critical }
    }

    fn disk_usage(path: &Path) -> Option<(PathBuf, f64)> {
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let disks = Disks::new_with_refreshed_list();

        disks
            .list()
            .iter()
            .filter(|disk| path.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().as_os_str().len())
            .and_then(|disk| {
                used_percent(disk.total_space(), disk.available_space())
                    .map(|pct| (disk.mount_point().to_path_buf(), pct))
            })
    }
}

#[async_trait]
impl Probe for DiskProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::ResourceThreshold
    }

    async fn check(&self) -> ProbeResult {
        let path = self.path.clone();
        match tokio::task::spawn_blocking(move || Self::disk_usage(&path)).await {
            Ok(Some((mount, pct))) => evaluate_usage(
                &self.name,
                &format!("disk {}", mount.display()),
                pct,
                self.warning,
                self.critical,
            ),
            Ok(None) => ProbeResult::fail(
                &self.name,
                self.kind(),
                format!("no filesystem found for {}", self.path.display()),
            ),
            Err(e) => ProbeResult::fail(&self.name, self.kind(), format!("disk query failed: {}", e)),
        }
    }
}

pub struct MemoryProbe {
    name: String,
    warning: f64,
    critical: f64,
}

impl MemoryProbe {
    pub fn new(name: String, warning: f64, critical: f64) -> Self {
        Self { name, warning, critical }
    }
}

#[async_trait]
impl Probe for MemoryProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::ResourceThreshold
    }

    async fn check(&self) -> ProbeResult {
        let usage = tokio::task::spawn_blocking(|| {
            let mut sys = System::new();
            sys.refresh_memory();
            used_percent(sys.total_memory(), sys.available_memory())
        })
        .await;

        match usage {
            Ok(Some(pct)) => evaluate_usage(&self.name, "memory", pct, self.warning, self.critical),
            Ok(None) => ProbeResult::fail(&self.name, self.kind(), "memory information unavailable"),
            Err(e) => ProbeResult::fail(&self.name, self.kind(), format!("memory query failed: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_used_percent() {
        assert_eq!(used_percent(0, 0), None);
        assert_eq!(used_percent(200, 50), Some(75.0));
        assert_eq!(used_percent(100, 150), Some(0.0));
    }
}
