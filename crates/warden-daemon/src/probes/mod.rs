mod dependency;
mod http;
mod liveness;
mod resources;
mod set;

pub use dependency::{ExecProbe, RedisProbe, TcpProbe};
pub use http::HttpProbe;
pub use liveness::{CommandProbe, ProcessProbe};
pub use resources::{evaluate_usage, DiskProbe, MemoryProbe};
pub use set::ProbeSet;

use async_trait::async_trait;
use std::time::{Duration, Instant};
use warden_types::{ProbeKind, ProbeResult};

use crate::config::{ProbeCheck, ProbeConfig};

/// A single read-only health check.
#[async_trait]
pub trait Probe: Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> ProbeKind;

    async fn check(&self) -> ProbeResult;

    /// Runs `check` under `timeout`. Expiry is reported as a failed result.
    async fn run(&self, timeout: Duration) -> ProbeResult {
        let started = Instant::now();
        let result = match tokio::time::timeout(timeout, self.check()).await {
            Ok(result) => result,
            Err(_) => ProbeResult::fail(
                self.name(),
                self.kind(),
                format!("timed out after {}ms", timeout.as_millis()),
            ),
        };
        result.with_elapsed_ms(started.elapsed().as_millis() as u64)
    }
}

pub fn build_probe(config: &ProbeConfig, http: &reqwest::Client) -> Box<dyn Probe> {
    let name = config.name.clone();
    match &config.check {
        ProbeCheck::Process { process } => Box::new(ProcessProbe::new(name, process.clone())),
        ProbeCheck::Command { command, expect_stdout } => Box::new(CommandProbe::new(
            name,
            command.clone(),
            expect_stdout.clone(),
        )),
        ProbeCheck::Http { url, expect_status, expect_body } => Box::new(HttpProbe::new(
            name,
            http.clone(),
            url.clone(),
            *expect_status,
            expect_body.clone(),
        )),
        ProbeCheck::Tcp { address } => Box::new(TcpProbe::new(name, address.clone())),
        ProbeCheck::Redis { address } => Box::new(RedisProbe::new(name, address.clone())),
        ProbeCheck::Exec { command } => Box::new(ExecProbe::new(name, command.clone())),
        ProbeCheck::Disk { path, warning_percent, critical_percent } => Box::new(DiskProbe::new(
            name,
            path.clone(),
            *warning_percent,
            *critical_percent,
        )),
        ProbeCheck::Memory { warning_percent, critical_percent } => {
            Box::new(MemoryProbe::new(name, *warning_percent, *critical_percent))
        }
    }
}
