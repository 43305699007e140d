use async_trait::async_trait;
use std::time::Instant;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use warden_types::{ProbeKind, ProbeResult};

use super::liveness::COMMAND_HARD_LIMIT;
use super::Probe;
use crate::command::run_command;

pub struct TcpProbe {
    name: String,
    address: String,
}

impl TcpProbe {
    pub fn new(name: String, address: String) -> Self {
        Self { name, address }
    }
}

#[async_trait]
impl Probe for TcpProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::Dependency
    }

    async fn check(&self) -> ProbeResult {
        let started = Instant::now();
        match TcpStream::connect(&self.address).await {
            Ok(_) => ProbeResult::pass(&self.name, self.kind())
                .with_measurement(started.elapsed().as_secs_f64() * 1000.0),
            Err(e) => ProbeResult::fail(
                &self.name,
                self.kind(),
                format!("connect to {} failed: {}", self.address, e),
            ),
        }
    }
}

/// Cache reachability via a RESP `PING`.
pub struct RedisProbe {
    name: String,
    address: String,
}

impl RedisProbe {
    pub fn new(name: String, address: String) -> Self {
        Self { name, address }
    }

    async fn ping(&self) -> Result<String, String> {
        let mut stream = TcpStream::connect(&self.address)
            .await
            .map_err(|e| format!("connect to {} failed: {}", self.address, e))?;

        stream
            .write_all(b"PING\r\n")
            .await
            .map_err(|e| format!("write to {} failed: {}", self.address, e))?;

        let mut buf = [0u8; 128];
        let n = stream
            .read(&mut buf)
            .await
            .map_err(|e| format!("read from {} failed: {}", self.address, e))?;
        if n == 0 {
            return Err(format!("{} closed the connection", self.address));
        }

        Ok(String::from_utf8_lossy(&buf[..n]).trim_end().to_string())
    }
}

#[async_trait]
impl Probe for RedisProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::Dependency
    }

    async fn check(&self) -> ProbeResult {
        let started = Instant::now();
        match self.ping().await {
            Ok(reply) if reply.starts_with("+PONG") => ProbeResult::pass(&self.name, self.kind())
                .with_measurement(started.elapsed().as_secs_f64() * 1000.0),
            Ok(reply) => ProbeResult::fail(
                &self.name,
                self.kind(),
                format!("unexpected PING reply from {}: {}", self.address, reply),
            ),
            Err(detail) => ProbeResult::fail(&self.name, self.kind(), detail),
        }
    }
}

/// Dependency check through a client command, e.g. `psql -c 'select 1'`.
pub struct ExecProbe {
    name: String,
    command: Vec<String>,
}

impl ExecProbe {
    pub fn new(name: String, command: Vec<String>) -> Self {
        Self { name, command }
    }
}

#[async_trait]
impl Probe for ExecProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::Dependency
    }

    async fn check(&self) -> ProbeResult {
        match run_command(&self.command, &[], COMMAND_HARD_LIMIT).await {
            Ok(output) if output.success() => ProbeResult::pass(&self.name, self.kind()),
            Ok(output) => ProbeResult::fail(&self.name, self.kind(), output.describe_failure()),
            Err(e) => ProbeResult::fail(&self.name, self.kind(), e.to_string()),
        }
    }
}
