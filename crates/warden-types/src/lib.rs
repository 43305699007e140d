#![forbid(unsafe_code)]
#![warn(clippy::all)]

mod error;
mod health;

pub use error::{WardenError, WardenResult};
pub use health::{HealthClassification, ProbeKind, ProbeResult, Severity};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_ordering() {
        assert!(HealthClassification::Healthy < HealthClassification::Degraded);
        assert!(HealthClassification::Degraded < HealthClassification::Critical);
        assert_eq!(HealthClassification::default(), HealthClassification::Healthy);
    }

    #[test]
    fn test_transition_severity() {
        use HealthClassification::*;
        assert_eq!(Severity::for_transition(Healthy, Degraded), Severity::Warning);
        assert_eq!(Severity::for_transition(Healthy, Critical), Severity::Alert);
        assert_eq!(Severity::for_transition(Degraded, Critical), Severity::Alert);
        assert_eq!(Severity::for_transition(Critical, Healthy), Severity::Info);
        assert_eq!(Severity::for_transition(Degraded, Healthy), Severity::Info);
        assert_eq!(Severity::for_transition(Critical, Critical), Severity::Alert);
    }

    #[test]
    fn test_stepping_down_from_critical_is_not_a_warning() {
        use HealthClassification::*;
        assert_eq!(Severity::for_transition(Critical, Degraded), Severity::Info);
        assert!(Severity::for_transition(Critical, Degraded) < Severity::for_transition(Healthy, Degraded));
    }

    #[test]
    fn test_classification_serde() {
        let json = serde_json::to_string(&HealthClassification::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let parsed: HealthClassification = serde_json::from_str("\"degraded\"").unwrap();
        assert_eq!(parsed, HealthClassification::Degraded);
    }

    #[test]
    fn test_probe_result_display() {
        let result = ProbeResult::fail("disk-root", ProbeKind::ResourceThreshold, "93.0% >= 90% critical")
            .with_measurement(93.0);
        let text = result.to_string();
        assert!(text.starts_with("[FAIL] disk-root (resource)"));
        assert!(text.contains("93.0"));
    }

    #[test]
    fn test_fatal_errors() {
        assert!(WardenError::StatePersistence("disk full".into()).is_fatal());
        assert!(WardenError::StateLocked("held".into()).is_fatal());
        assert!(WardenError::Config("bad toml".into()).is_fatal());
        assert!(!WardenError::Notification("timeout".into()).is_fatal());
        assert!(!WardenError::Diagnostics("no space".into()).is_fatal());
        assert!(!WardenError::Remediation("exit 1".into()).is_fatal());
    }
}
