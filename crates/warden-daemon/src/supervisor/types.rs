use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use warden_types::{HealthClassification, ProbeResult, Severity};

use crate::state::SupervisorState;

pub const EXIT_OK: u8 = 0;
pub const EXIT_CRITICAL: u8 = 1;
pub const EXIT_FATAL: u8 = 2;
pub const EXIT_LOCKED: u8 = 3;

/// What the remediation step of a tick did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RemediationDecision {
    NotNeeded,
    CoolingDown { remaining: Duration },
    BudgetExhausted { attempts: u32 },
    Restarted { attempt: u32, verified: HealthClassification },
    RestartFailed { attempt: u32, error: String },
}

impl RemediationDecision {
    pub fn restarted(&self) -> bool {
        matches!(
            self,
            RemediationDecision::Restarted { .. } | RemediationDecision::RestartFailed { .. }
        )
    }
}

impl fmt::Display for RemediationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemediationDecision::NotNeeded => write!(f, "no remediation needed"),
            RemediationDecision::CoolingDown { remaining } => {
                write!(f, "restart suppressed, cooldown {}s remaining", remaining.as_secs())
            }
            RemediationDecision::BudgetExhausted { attempts } => {
                write!(f, "restart budget exhausted after {} attempts", attempts)
            }
            RemediationDecision::Restarted { attempt, verified } => {
                write!(f, "restart attempt {} done, service now {}", attempt, verified)
            }
            RemediationDecision::RestartFailed { attempt, error } => {
                write!(f, "restart attempt {} failed: {}", attempt, error)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NotificationRecord {
    pub severity: Severity,
    pub from: HealthClassification,
    pub to: HealthClassification,
    pub escalated: bool,
    pub delivered: bool,
}

/// Outcome of one supervision tick.
#[derive(Clone, Debug, Serialize)]
pub struct TickReport {
    pub started_at: DateTime<Utc>,
    pub initial: HealthClassification,
    pub classification: HealthClassification,
    pub results: Vec<ProbeResult>,
    pub remediation: RemediationDecision,
    pub notification: Option<NotificationRecord>,
    pub snapshot: Option<PathBuf>,
    pub state: SupervisorState,
}

impl TickReport {
    pub fn exit_code(&self) -> u8 {
        if self.classification.is_critical() {
            EXIT_CRITICAL
        } else {
            EXIT_OK
        }
    }
}
