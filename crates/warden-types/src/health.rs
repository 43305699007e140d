use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthClassification {
    #[default]
    Healthy,
    Degraded,
    Critical,
}

impl HealthClassification {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthClassification::Healthy)
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, HealthClassification::Critical)
    }
}

impl fmt::Display for HealthClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthClassification::Healthy => write!(f, "healthy"),
            HealthClassification::Degraded => write!(f, "degraded"),
            HealthClassification::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Alert,
}

impl Severity {
    /// Entering `Critical` is an alert and any recovery is info. Reaching
    /// `Degraded` warns only when it is a decline; stepping down from
    /// `Critical` is an improvement and reports as info.
    pub fn for_transition(from: HealthClassification, to: HealthClassification) -> Self {
        match to {
            HealthClassification::Critical => Severity::Alert,
            HealthClassification::Degraded if from.is_critical() => Severity::Info,
            HealthClassification::Degraded => Severity::Warning,
            HealthClassification::Healthy => Severity::Info,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Alert => write!(f, "alert"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    Liveness,
    HttpEndpoint,
    Dependency,
    ResourceThreshold,
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeKind::Liveness => write!(f, "liveness"),
            ProbeKind::HttpEndpoint => write!(f, "http"),
            ProbeKind::Dependency => write!(f, "dependency"),
            ProbeKind::ResourceThreshold => write!(f, "resource"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub name: String,
    pub kind: ProbeKind,
    pub passed: bool,
    pub measurement: Option<f64>,
    pub detail: Option<String>,
    pub elapsed_ms: u64,
}

impl ProbeResult {
    pub fn pass(name: impl Into<String>, kind: ProbeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            passed: true,
            measurement: None,
            detail: None,
            elapsed_ms: 0,
        }
    }

    pub fn fail(name: impl Into<String>, kind: ProbeKind, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            passed: false,
            measurement: None,
            detail: Some(detail.into()),
            elapsed_ms: 0,
        }
    }

    pub fn with_measurement(mut self, value: f64) -> Self {
        self.measurement = Some(value);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_elapsed_ms(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "PASS" } else { "FAIL" };
        write!(f, "[{}] {} ({})", status, self.name, self.kind)?;
        if let Some(value) = self.measurement {
            write!(f, " {:.1}", value)?;
        }
        if let Some(ref detail) = self.detail {
            write!(f, " - {}", detail)?;
        }
        Ok(())
    }
}
