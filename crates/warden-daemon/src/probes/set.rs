use futures::future::join_all;
use std::time::Duration;
use tracing::{debug, warn};
use warden_types::{ProbeResult, WardenError, WardenResult};

use super::{build_probe, Probe};
use crate::config::ProbesConfig;

struct Entry {
    probe: Box<dyn Probe>,
    timeout: Duration,
}

/// The fixed set of probes evaluated every tick. All probes start together;
/// each is bounded by its own timeout and by the tick-wide ceiling.
pub struct ProbeSet {
    entries: Vec<Entry>,
    ceiling: Duration,
}

impl ProbeSet {
    pub fn new(ceiling: Duration) -> Self {
        Self {
            entries: Vec::new(),
            ceiling,
        }
    }

    pub fn from_config(config: &ProbesConfig, http: &reqwest::Client) -> WardenResult<Self> {
        let mut set = Self::new(config.tick_ceiling());
        for probe_config in &config.checks {
            let timeout = probe_config
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.timeout());
            set.add(build_probe(probe_config, http), timeout)?;
        }
        Ok(set)
    }

    pub fn add(&mut self, probe: Box<dyn Probe>, timeout: Duration) -> WardenResult<()> {
        if self.entries.iter().any(|e| e.probe.name() == probe.name()) {
            return Err(WardenError::Config(format!(
                "Duplicate probe name: {}",
                probe.name()
            )));
        }
        self.entries.push(Entry { probe, timeout });
        Ok(())
    }

    pub fn with_probe(mut self, probe: Box<dyn Probe>, timeout: Duration) -> WardenResult<Self> {
        self.add(probe, timeout)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.probe.name()).collect()
    }

    pub async fn run_all(&self) -> Vec<ProbeResult> {
        let runs = self
            .entries
            .iter()
            .map(|entry| entry.probe.run(entry.timeout.min(self.ceiling)));

        let results = join_all(runs).await;

        for result in &results {
            if result.passed {
                debug!("{}", result);
            } else {
                warn!("{}", result);
            }
        }

        results
    }
}
