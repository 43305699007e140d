use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use warden_types::{HealthClassification, ProbeResult, Severity, WardenError, WardenResult};

use super::types::*;
use crate::classifier::{classify, failing};
use crate::config::{PolicyConfig, WardenConfig};
use crate::diagnostics::{DiagnosticsCollector, FsDiagnosticsCollector, SnapshotContext};
use crate::notify::{AlertContext, Notifier};
use crate::probes::ProbeSet;
use crate::remediation::{CommandRemediator, Remediator};
use crate::state::{JsonStateStore, StateStore, SupervisorState};

/// Remediation decision for a `Critical` classification. Cooldown is checked
/// before the attempt budget, so an exhausted budget inside the window still
/// reports the cooldown.
pub fn decide(
    state: &SupervisorState,
    now: DateTime<Utc>,
    policy: &PolicyConfig,
) -> Option<RemediationDecision> {
    if let Some(remaining) = state.cooldown_remaining(now, policy.cooldown()) {
        return Some(RemediationDecision::CoolingDown { remaining });
    }
    if state.budget_exhausted(policy.max_attempts) {
        return Some(RemediationDecision::BudgetExhausted {
            attempts: state.restart_attempt_count,
        });
    }
    None
}

pub struct Supervisor {
    service: String,
    policy: PolicyConfig,
    probes: ProbeSet,
    remediator: Box<dyn Remediator>,
    diagnostics: Option<Box<dyn DiagnosticsCollector>>,
    notifier: Notifier,
    store: Box<dyn StateStore>,
}

impl Supervisor {
    pub fn new(
        service: impl Into<String>,
        policy: PolicyConfig,
        probes: ProbeSet,
        remediator: Box<dyn Remediator>,
        notifier: Notifier,
        store: Box<dyn StateStore>,
    ) -> Self {
        Self {
            service: service.into(),
            policy,
            probes,
            remediator,
            diagnostics: None,
            notifier,
            store,
        }
    }

    pub fn with_diagnostics(mut self, collector: Box<dyn DiagnosticsCollector>) -> Self {
        self.diagnostics = Some(collector);
        self
    }

    pub fn from_config(config: &WardenConfig) -> WardenResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| WardenError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let probes = ProbeSet::from_config(&config.probes, &http)?;
        let remediator = CommandRemediator::from_config(&config.remediation);
        let notifier = Notifier::from_config(&config.notify)?;
        let store = JsonStateStore::new(config.state_path());

        let mut supervisor = Self::new(
            config.service.name.clone(),
            config.policy.clone(),
            probes,
            Box::new(remediator),
            notifier,
            Box::new(store),
        );
        if config.diagnostics.enabled {
            supervisor = supervisor.with_diagnostics(Box::new(FsDiagnosticsCollector::new(
                config.diagnostics_dir(),
                &config.diagnostics,
            )));
        }
        Ok(supervisor)
    }

    pub fn store(&self) -> &dyn StateStore {
        self.store.as_ref()
    }

    /// Runs one supervision tick. Only state load/save errors escape; every
    /// other failure is folded into the report.
    pub async fn tick(&self, now: DateTime<Utc>) -> WardenResult<TickReport> {
        info!(
            "Tick started for {} ({} probes, state at {})",
            self.service,
            self.probes.len(),
            self.store.describe()
        );

        let mut state = self.store.load()?;
        let previous = state.last_classification;

        let mut results = self.probes.run_all().await;
        let initial = classify(&results);
        info!("Classification: {} (previous {})", initial, previous);

        if initial.is_healthy() && state.restart_attempt_count > 0 {
            info!(
                "Service healthy, resetting restart attempts (was {})",
                state.restart_attempt_count
            );
            state.restart_attempt_count = 0;
            state.last_remediation_error = None;
        }

        let mut classification = initial;
        let remediation = if initial.is_critical() {
            match decide(&state, now, &self.policy) {
                Some(decision) => decision,
                None => {
                    let (decision, verified) = self.remediate(&mut state, now).await;
                    if let Some((verified_results, verified_class)) = verified {
                        results = verified_results;
                        classification = verified_class;
                    }
                    decision
                }
            }
        } else {
            RemediationDecision::NotNeeded
        };
        self.log_decision(&remediation);

        let escalated = classification.is_critical()
            && state.budget_exhausted(self.policy.max_attempts);
        if escalated {
            error!(
                "{} is critical after {} restart attempts: manual intervention required",
                self.service, state.restart_attempt_count
            );
        }

        let snapshot = if classification.is_critical() {
            self.collect_diagnostics(classification, &results, now).await
        } else {
            None
        };

        let transition = classification != state.last_notified_classification;
        let first_escalation = escalated && !state.escalation_notified;
        let notification = if transition || first_escalation {
            let from = state.last_notified_classification;
            let context = AlertContext {
                service: self.service.clone(),
                failing_probes: failing(&results).iter().map(|r| r.name.clone()).collect(),
                escalated,
                remediation: remediation.restarted().then(|| remediation.to_string()),
                snapshot: snapshot.clone(),
            };
            let delivered = self.notifier.notify(from, classification, &context).await;
            state.last_notified_classification = classification;
            Some(NotificationRecord {
                severity: Severity::for_transition(from, classification),
                from,
                to: classification,
                escalated,
                delivered,
            })
        } else {
            debug!("No transition from {}, notification suppressed", classification);
            None
        };

        // One escalation per critical episode; leaving Critical re-arms it.
        if !classification.is_critical() {
            state.escalation_notified = false;
        } else if escalated {
            state.escalation_notified = true;
        }

        state.last_classification = classification;
        self.store.save(&state)?;

        info!("Tick finished: {}", classification);
        Ok(TickReport {
            started_at: now,
            initial,
            classification,
            results,
            remediation,
            notification,
            snapshot,
            state,
        })
    }

    async fn remediate(
        &self,
        state: &mut SupervisorState,
        now: DateTime<Utc>,
    ) -> (
        RemediationDecision,
        Option<(Vec<ProbeResult>, HealthClassification)>,
    ) {
        state.restart_attempt_count += 1;
        state.last_restart_timestamp = Some(now);
        let attempt = state.restart_attempt_count;

        info!(
            "Restart attempt {}/{} for {}",
            attempt, self.policy.max_attempts, self.service
        );

        if let Err(e) = self.remediator.restart().await {
            error!("Restart attempt {} failed: {}", attempt, e);
            let error = e.to_string();
            state.last_remediation_error = Some(error.clone());
            return (RemediationDecision::RestartFailed { attempt, error }, None);
        }
        state.last_remediation_error = None;

        let settle = self.policy.settle_delay();
        if !settle.is_zero() {
            debug!("Waiting {}s for {} to settle", settle.as_secs(), self.service);
            tokio::time::sleep(settle).await;
        }

        let results = self.probes.run_all().await;
        let verified = classify(&results);
        (
            RemediationDecision::Restarted { attempt, verified },
            Some((results, verified)),
        )
    }

    fn log_decision(&self, decision: &RemediationDecision) {
        match decision {
            RemediationDecision::NotNeeded => debug!("Remediation: {}", decision),
            RemediationDecision::CoolingDown { .. } => info!("Remediation: {}", decision),
            RemediationDecision::Restarted { verified, .. } if verified.is_healthy() => {
                info!("Remediation: {}", decision)
            }
            _ => warn!("Remediation: {}", decision),
        }
    }

    async fn collect_diagnostics(
        &self,
        classification: HealthClassification,
        results: &[ProbeResult],
        now: DateTime<Utc>,
    ) -> Option<PathBuf> {
        let collector = self.diagnostics.as_ref()?;
        let context = SnapshotContext {
            service: self.service.clone(),
            classification,
            results: results.to_vec(),
            taken_at: now,
        };
        match collector.collect(&context).await {
            Ok(snapshot) => Some(snapshot.path),
            Err(e) => {
                warn!("Diagnostics collection failed: {}", e);
                None
            }
        }
    }
}
