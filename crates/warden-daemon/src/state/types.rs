use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use warden_types::HealthClassification;

/// The supervisor's only persisted record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisorState {
    pub restart_attempt_count: u32,
    pub last_restart_timestamp: Option<DateTime<Utc>>,
    pub last_classification: HealthClassification,
    pub last_notified_classification: HealthClassification,
    pub last_remediation_error: Option<String>,
    /// Set once the "manual intervention required" alert for the current
    /// critical episode has gone out.
    pub escalation_notified: bool,
}

impl SupervisorState {
    /// Time left before another restart is allowed, or `None` once the
    /// cooldown has elapsed. A restart stamped in the future (clock moved
    /// backwards) keeps the full window in force.
    pub fn cooldown_remaining(&self, now: DateTime<Utc>, cooldown: Duration) -> Option<Duration> {
        let last = self.last_restart_timestamp?;
        let elapsed = now.signed_duration_since(last).to_std().unwrap_or(Duration::ZERO);
        if elapsed < cooldown {
            Some(cooldown - elapsed)
        } else {
            None
        }
    }

    pub fn budget_exhausted(&self, max_attempts: u32) -> bool {
        self.restart_attempt_count >= max_attempts
    }
}
