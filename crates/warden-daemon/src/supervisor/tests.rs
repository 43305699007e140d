use super::*;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use std::time::Duration;
use warden_types::HealthClassification;

use crate::config::PolicyConfig;
use crate::state::SupervisorState;

fn policy() -> PolicyConfig {
    PolicyConfig {
        cooldown_secs: 300,
        max_attempts: 3,
        settle_secs: 0,
    }
}

#[test]
fn test_decide_allows_first_restart() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    assert_eq!(decide(&SupervisorState::default(), now, &policy()), None);
}

#[test]
fn test_decide_cooldown() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let state = SupervisorState {
        restart_attempt_count: 1,
        last_restart_timestamp: Some(now - ChronoDuration::minutes(2)),
        ..Default::default()
    };
    assert_eq!(
        decide(&state, now, &policy()),
        Some(RemediationDecision::CoolingDown {
            remaining: Duration::from_secs(180)
        })
    );

    let later = now + ChronoDuration::minutes(3);
    assert_eq!(decide(&state, later, &policy()), None);
}

#[test]
fn test_decide_budget_exhausted() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let state = SupervisorState {
        restart_attempt_count: 3,
        last_restart_timestamp: Some(now - ChronoDuration::hours(1)),
        ..Default::default()
    };
    assert_eq!(
        decide(&state, now, &policy()),
        Some(RemediationDecision::BudgetExhausted { attempts: 3 })
    );
}

#[test]
fn test_decision_display() {
    assert_eq!(
        RemediationDecision::CoolingDown {
            remaining: Duration::from_secs(42)
        }
        .to_string(),
        "restart suppressed, cooldown 42s remaining"
    );
    assert_eq!(
        RemediationDecision::Restarted {
            attempt: 2,
            verified: HealthClassification::Healthy
        }
        .to_string(),
        "restart attempt 2 done, service now healthy"
    );
    assert!(RemediationDecision::RestartFailed {
        attempt: 1,
        error: "boom".into()
    }
    .restarted());
    assert!(!RemediationDecision::NotNeeded.restarted());
}

#[test]
fn test_decision_serializes_tagged() {
    let json = serde_json::to_value(RemediationDecision::BudgetExhausted { attempts: 3 }).unwrap();
    assert_eq!(json["action"], "budget_exhausted");
    assert_eq!(json["attempts"], 3);
}
