use warden_types::{HealthClassification, ProbeResult};

/// Aggregates one tick's probe results.
///
/// `Healthy` when every probe passed, `Critical` when at most two thirds
/// passed (`passed * 3 <= total * 2`, so a result exactly on the boundary
/// is critical), `Degraded` otherwise. An empty result set cannot vouch for
/// anything and is `Critical`.
pub fn classify(results: &[ProbeResult]) -> HealthClassification {
    let total = results.len();
    if total == 0 {
        return HealthClassification::Critical;
    }

    let passed = results.iter().filter(|r| r.passed).count();

    if passed == total {
        HealthClassification::Healthy
    } else if passed * 3 <= total * 2 {
        HealthClassification::Critical
    } else {
        HealthClassification::Degraded
    }
}

pub fn failing(results: &[ProbeResult]) -> Vec<&ProbeResult> {
    results.iter().filter(|r| !r.passed).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use warden_types::ProbeKind;

    fn results(passed: usize, failed: usize) -> Vec<ProbeResult> {
        let mut out = Vec::new();
        for i in 0..passed {
            out.push(ProbeResult::pass(format!("ok-{}", i), ProbeKind::Dependency));
        }
        for i in 0..failed {
            out.push(ProbeResult::fail(format!("bad-{}", i), ProbeKind::Dependency, "down"));
        }
        out
    }

    #[test]
    fn test_all_pass_is_healthy() {
        assert_eq!(classify(&results(7, 0)), HealthClassification::Healthy);
        assert_eq!(classify(&results(1, 0)), HealthClassification::Healthy);
    }

    #[test]
    fn test_seven_probe_scheme() {
        assert_eq!(classify(&results(6, 1)), HealthClassification::Degraded);
        assert_eq!(classify(&results(5, 2)), HealthClassification::Degraded);
        assert_eq!(classify(&results(4, 3)), HealthClassification::Critical);
        assert_eq!(classify(&results(2, 5)), HealthClassification::Critical);
        assert_eq!(classify(&results(0, 7)), HealthClassification::Critical);
    }

    #[test]
    fn test_boundary_is_critical() {
        assert_eq!(classify(&results(4, 2)), HealthClassification::Critical);
        assert_eq!(classify(&results(2, 1)), HealthClassification::Critical);
        assert_eq!(classify(&results(5, 1)), HealthClassification::Degraded);
    }

    #[test]
    fn test_empty_is_critical() {
        assert_eq!(classify(&[]), HealthClassification::Critical);
    }

    #[test]
    fn test_failing() {
        let r = results(2, 1);
        let failed = failing(&r);
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].name, "bad-0");
    }

    proptest! {
        #[test]
        fn prop_classify_is_deterministic(outcomes in proptest::collection::vec(any::<bool>(), 0..32)) {
            let set: Vec<ProbeResult> = outcomes
                .iter()
                .enumerate()
                .map(|(i, &ok)| {
                    if ok {
                        ProbeResult::pass(format!("p{}", i), ProbeKind::Liveness)
                    } else {
                        ProbeResult::fail(format!("p{}", i), ProbeKind::Liveness, "x")
                    }
                })
                .collect();
            prop_assert_eq!(classify(&set), classify(&set.clone()));
        }

        #[test]
        fn prop_classification_depends_only_on_counts(passed in 0usize..20, failed in 0usize..20) {
            let mut forward = results(passed, failed);
            let c = classify(&forward);
            forward.reverse();
            prop_assert_eq!(classify(&forward), c);

            let total = passed + failed;
            if total > 0 && failed == 0 {
                prop_assert_eq!(c, HealthClassification::Healthy);
            }
            if total > 0 && failed > 0 && passed * 3 > total * 2 {
                prop_assert_eq!(c, HealthClassification::Degraded);
            }
            if passed * 3 <= total * 2 {
                prop_assert_eq!(c, HealthClassification::Critical);
            }
        }

        #[test]
        fn prop_more_failures_never_improve(passed in 1usize..20, failed in 0usize..20) {
            let before = classify(&results(passed, failed));
            let after = classify(&results(passed - 1, failed + 1));
            prop_assert!(after >= before);
        }
    }
}
