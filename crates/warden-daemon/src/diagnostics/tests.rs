use super::collector::last_lines;
use super::*;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use std::path::PathBuf;
use warden_types::{HealthClassification, ProbeKind, ProbeResult};

use crate::config::DiagnosticsConfig;

fn context_at(taken_at: chrono::DateTime<Utc>) -> SnapshotContext {
    SnapshotContext {
        service: "app".into(),
        classification: HealthClassification::Critical,
        results: vec![
            ProbeResult::fail("api", ProbeKind::HttpEndpoint, "status 503"),
            ProbeResult::pass("db", ProbeKind::Dependency),
        ],
        taken_at,
    }
}

#[test]
fn test_snapshot_file_name() {
    let ts = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 5).unwrap();
    let name = snapshot_file_name(ts);
    assert_eq!(name, "snapshot-20260301T123005.000Z.json");
    assert_eq!(parse_snapshot_file_name(&name), Some(ts));
}

#[test]
fn test_parse_ignores_foreign_files() {
    assert_eq!(parse_snapshot_file_name("state.json"), None);
    assert_eq!(parse_snapshot_file_name("snapshot-garbage.json"), None);
    assert_eq!(parse_snapshot_file_name("snapshot-20260301T123005.000Z.txt"), None);
}

#[test]
fn test_select_keeps_newest() {
    let now = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
    let snapshots: Vec<(PathBuf, _)> = (0..8)
        .map(|day| {
            let ts = now - ChronoDuration::days(day + 2);
            (PathBuf::from(format!("s{}", day)), ts)
        })
        .collect();

    let mut doomed = select_for_pruning(&snapshots, 5, ChronoDuration::hours(24), now);
    doomed.sort();
    assert_eq!(
        doomed,
        vec![PathBuf::from("s5"), PathBuf::from("s6"), PathBuf::from("s7")]
    );
}

#[test]
fn test_select_keeps_recent_beyond_count() {
    let now = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
    let snapshots: Vec<(PathBuf, _)> = (0..10)
        .map(|i| {
            let ts = now - ChronoDuration::minutes(i * 5);
            (PathBuf::from(format!("s{}", i)), ts)
        })
        .collect();

    assert!(select_for_pruning(&snapshots, 5, ChronoDuration::hours(24), now).is_empty());
}

#[test]
fn test_last_lines() {
    assert_eq!(last_lines("a\nb\nc\n", 2), vec!["b", "c"]);
    assert_eq!(last_lines("a\nb", 10), vec!["a", "b"]);
    assert!(last_lines("", 3).is_empty());
}

#[tokio::test]
async fn test_collect_writes_bundle_and_prunes() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("app.log");
    let body: String = (0..50).map(|i| format!("line {}\n", i)).collect();
    std::fs::write(&log, body).unwrap();

    let now = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
    let snap_dir = dir.path().join("diagnostics");
    std::fs::create_dir_all(&snap_dir).unwrap();
    for day in 2..9 {
        let old = snap_dir.join(snapshot_file_name(now - ChronoDuration::days(day)));
        std::fs::write(old, "{}").unwrap();
    }

    let config = DiagnosticsConfig {
        log_file: Some(log),
        log_tail_lines: 3,
        max_processes: 4,
        ..Default::default()
    };
    let collector = FsDiagnosticsCollector::new(snap_dir.clone(), &config);

    let snapshot_ref = collector.collect(&context_at(now)).await.unwrap();
    assert!(snapshot_ref.path.exists());
    assert_eq!(snapshot_ref.pruned, 3);
    assert_eq!(list_snapshots(&snap_dir).unwrap().len(), 5);

    let bytes = std::fs::read(&snapshot_ref.path).unwrap();
    let snapshot: DiagnosticsSnapshot = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(snapshot.classification, HealthClassification::Critical);
    assert_eq!(snapshot.probe_results.len(), 2);
    assert_eq!(snapshot.log_tail, vec!["line 47", "line 48", "line 49"]);
    assert!(snapshot.processes.len() <= 4);
    assert!(snapshot.errors.is_empty());
    assert!(snapshot.resources.is_some());
}

#[tokio::test]
async fn test_collect_records_log_errors() {
    let dir = tempfile::tempdir().unwrap();
    let config = DiagnosticsConfig {
        log_file: Some(dir.path().join("missing.log")),
        ..Default::default()
    };
    let collector = FsDiagnosticsCollector::new(dir.path().join("diag"), &config);

    let snapshot_ref = collector.collect(&context_at(Utc::now())).await.unwrap();
    let bytes = std::fs::read(&snapshot_ref.path).unwrap();
    let snapshot: DiagnosticsSnapshot = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(snapshot.errors.len(), 1);
    assert!(snapshot.errors[0].starts_with("log tail failed"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_collect_log_command() {
    let dir = tempfile::tempdir().unwrap();
    let config = DiagnosticsConfig {
        log_command: Some(vec![
            "sh".into(),
            "-c".into(),
            "printf 'one\\ntwo\\n'; echo three >&2".into(),
        ]),
        log_tail_lines: 2,
        ..Default::default()
    };
    let collector = FsDiagnosticsCollector::new(dir.path().to_path_buf(), &config);

    let snapshot_ref = collector.collect(&context_at(Utc::now())).await.unwrap();
    let bytes = std::fs::read(&snapshot_ref.path).unwrap();
    let snapshot: DiagnosticsSnapshot = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(snapshot.log_tail, vec!["two", "three"]);
}

#[tokio::test]
async fn test_collect_fails_on_unwritable_dir() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();

    let collector = FsDiagnosticsCollector::new(blocker.join("diag"), &DiagnosticsConfig::default());
    assert!(collector.collect(&context_at(Utc::now())).await.is_err());
}
