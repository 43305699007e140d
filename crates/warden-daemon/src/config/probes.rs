use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use warden_types::ProbeKind;

use super::constants::{
    DEFAULT_CRITICAL_PERCENT, DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_TICK_CEILING_SECS,
    DEFAULT_WARNING_PERCENT,
};

fn default_warning_percent() -> f64 {
    DEFAULT_WARNING_PERCENT
}

fn default_critical_percent() -> f64 {
    DEFAULT_CRITICAL_PERCENT
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbesConfig {
    pub timeout_secs: u64,
    pub tick_ceiling_secs: u64,
    pub checks: Vec<ProbeConfig>,
}

impl Default for ProbesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            tick_ceiling_secs: DEFAULT_TICK_CEILING_SECS,
            checks: vec![
                ProbeConfig {
                    name: "disk-root".into(),
                    timeout_secs: None,
                    check: ProbeCheck::Disk {
                        path: PathBuf::from("/"),
                        warning_percent: DEFAULT_WARNING_PERCENT,
                        critical_percent: DEFAULT_CRITICAL_PERCENT,
                    },
                },
                ProbeConfig {
                    name: "memory".into(),
                    timeout_secs: None,
                    check: ProbeCheck::Memory {
                        warning_percent: DEFAULT_WARNING_PERCENT,
                        critical_percent: DEFAULT_CRITICAL_PERCENT,
                    },
                },
                ProbeConfig {
                    name: "app-process".into(),
                    timeout_secs: None,
                    check: ProbeCheck::Process { process: "app".into() },
                },
                ProbeConfig {
                    name: "app-http".into(),
                    timeout_secs: None,
                    check: ProbeCheck::Http {
                        url: "http://127.0.0.1:8080/health".into(),
                        expect_status: None,
                        expect_body: None,
                    },
                },
                ProbeConfig {
                    name: "database".into(),
                    timeout_secs: None,
                    check: ProbeCheck::Tcp { address: "127.0.0.1:5432".into() },
                },
            ],
        }
    }
}

impl ProbesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn tick_ceiling(&self) -> Duration {
        Duration::from_secs(self.tick_ceiling_secs)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(flatten)]
    pub check: ProbeCheck,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProbeCheck {
    Process {
        process: String,
    },
    Command {
        command: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect_stdout: Option<String>,
    },
    Http {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect_status: Option<u16>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect_body: Option<String>,
    },
    Tcp {
        address: String,
    },
    Redis {
        address: String,
    },
    Exec {
        command: Vec<String>,
    },
    Disk {
        path: PathBuf,
        #[serde(default = "default_warning_percent")]
        warning_percent: f64,
        #[serde(default = "default_critical_percent")]
        critical_percent: f64,
    },
    Memory {
        #[serde(default = "default_warning_percent")]
        warning_percent: f64,
        #[serde(default = "default_critical_percent")]
        critical_percent: f64,
    },
}

/// Every tick must cover each of these kinds.
pub const REQUIRED_PROBE_KINDS: [ProbeKind; 4] = [
    ProbeKind::Liveness,
    ProbeKind::HttpEndpoint,
    ProbeKind::Dependency,
    ProbeKind::ResourceThreshold,
];

impl ProbeCheck {
    pub fn kind(&self) -> ProbeKind {
        match self {
            ProbeCheck::Process { .. } | ProbeCheck::Command { .. } => ProbeKind::Liveness,
            ProbeCheck::Http { .. } => ProbeKind::HttpEndpoint,
            ProbeCheck::Tcp { .. } | ProbeCheck::Redis { .. } | ProbeCheck::Exec { .. } => {
                ProbeKind::Dependency
            }
            ProbeCheck::Disk { .. } | ProbeCheck::Memory { .. } => ProbeKind::ResourceThreshold,
        }
    }

    pub fn thresholds(&self) -> Option<(f64, f64)> {
        match self {
            ProbeCheck::Disk { warning_percent, critical_percent, .. }
            | ProbeCheck::Memory { warning_percent, critical_percent } => {
                Some((*warning_percent, *critical_percent))
            }
            _ => None,
        }
    }

    pub fn command(&self) -> Option<&[String]> {
        match self {
            ProbeCheck::Command { command, .. } | ProbeCheck::Exec { command } => Some(command),
            _ => None,
        }
    }
}
