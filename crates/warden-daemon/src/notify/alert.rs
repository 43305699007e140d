use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;
use warden_types::{HealthClassification, Severity};

/// What the supervisor knows about the tick when a transition is reported.
#[derive(Clone, Debug, Default)]
pub struct AlertContext {
    pub service: String,
    pub failing_probes: Vec<String>,
    pub escalated: bool,
    pub remediation: Option<String>,
    pub snapshot: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub severity: Severity,
    pub service: String,
    pub from: HealthClassification,
    pub to: HealthClassification,
    pub message: String,
    pub failing_probes: Vec<String>,
    pub escalated: bool,
    pub snapshot: Option<PathBuf>,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    pub fn new(
        from: HealthClassification,
        to: HealthClassification,
        context: &AlertContext,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            severity: Severity::for_transition(from, to),
            service: context.service.clone(),
            from,
            to,
            message: compose_message(from, to, context),
            failing_probes: context.failing_probes.clone(),
            escalated: context.escalated,
            snapshot: context.snapshot.clone(),
            timestamp,
        }
    }
}

fn compose_message(
    from: HealthClassification,
    to: HealthClassification,
    context: &AlertContext,
) -> String {
    let mut message = if context.escalated {
        format!(
            "{} is {}: restart budget exhausted, manual intervention required",
            context.service, to
        )
    } else if to.is_healthy() {
        format!("{} recovered ({} -> {})", context.service, from, to)
    } else {
        format!("{} is {} (was {})", context.service, to, from)
    };

    if !context.failing_probes.is_empty() {
        message.push_str(&format!("; failing: {}", context.failing_probes.join(", ")));
    }
    if let Some(ref remediation) = context.remediation {
        message.push_str(&format!("; {}", remediation));
    }
    message
}
