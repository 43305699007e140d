use async_trait::async_trait;
use std::time::Duration;
use sysinfo::System;
use warden_types::{ProbeKind, ProbeResult};

use super::Probe;
use crate::command::run_command;

// Upper bound for the child process itself; the probe timeout normally fires first.
pub(super) const COMMAND_HARD_LIMIT: Duration = Duration::from_secs(300);

pub struct ProcessProbe {
    name: String,
    process: String,
}

impl ProcessProbe {
    pub fn new(name: String, process: String) -> Self {
        Self { name, process }
    }
}

#[async_trait]
impl Probe for ProcessProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::Liveness
    }

    async fn check(&self) -> ProbeResult {
        let process = self.process.clone();
        let count = tokio::task::spawn_blocking(move || {
            let mut sys = System::new();
            sys.refresh_processes();
            sys.processes_by_exact_name(&process).count()
        })
        .await;

        match count {
            Ok(0) => ProbeResult::fail(
                &self.name,
                self.kind(),
                format!("no running process named '{}'", self.process),
            )
            .with_measurement(0.0),
            Ok(n) => ProbeResult::pass(&self.name, self.kind()).with_measurement(n as f64),
            Err(e) => ProbeResult::fail(
                &self.name,
                self.kind(),
                format!("process table unavailable: {}", e),
            ),
        }
    }
}

/// Liveness via an external query, e.g. `docker inspect -f {{.State.Running}} app`.
pub struct CommandProbe {
    name: String,
    command: Vec<String>,
    expect_stdout: Option<String>,
}

impl CommandProbe {
    pub fn new(name: String, command: Vec<String>, expect_stdout: Option<String>) -> Self {
        Self { name, command, expect_stdout }
    }
}

#[async_trait]
impl Probe for CommandProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::Liveness
    }

    async fn check(&self) -> ProbeResult {
        let output = match run_command(&self.command, &[], COMMAND_HARD_LIMIT).await {
            Ok(output) => output,
            Err(e) => return ProbeResult::fail(&self.name, self.kind(), e.to_string()),
        };

        if !output.success() {
            return ProbeResult::fail(&self.name, self.kind(), output.describe_failure());
        }

        match self.expect_stdout {
            Some(ref token) if !output.stdout.contains(token.as_str()) => ProbeResult::fail(
                &self.name,
                self.kind(),
                format!(
                    "expected '{}' in output, got '{}'",
                    token,
                    output.stdout.trim()
                ),
            ),
            _ => ProbeResult::pass(&self.name, self.kind()),
        }
    }
}
