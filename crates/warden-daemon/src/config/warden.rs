use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use warden_types::{WardenError, WardenResult};

use super::constants::{
    DEFAULT_TICK_INTERVAL_SECS, DIAGNOSTICS_DIR_NAME, LOCK_FILE_NAME, STATE_FILE_NAME,
};
use super::diagnostics::DiagnosticsConfig;
use super::logging::LoggingConfig;
use super::notify::NotifyConfig;
use super::policy::{PolicyConfig, RemediationConfig};
use super::probes::{ProbeCheck, ProbesConfig, REQUIRED_PROBE_KINDS};
use super::types::LogLevel;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub tick_interval_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "app".into(),
            tick_interval_secs: DEFAULT_TICK_INTERVAL_SECS,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WardenConfig {
    pub data_dir: PathBuf,
    pub state_file: Option<PathBuf>,
    pub service: ServiceConfig,
    pub probes: ProbesConfig,
    pub policy: PolicyConfig,
    pub remediation: RemediationConfig,
    pub diagnostics: DiagnosticsConfig,
    pub notify: NotifyConfig,
    pub logging: LoggingConfig,
}

pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".warden"))
        .unwrap_or_else(|| PathBuf::from("/var/lib/warden"))
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            state_file: None,
            service: ServiceConfig::default(),
            probes: ProbesConfig::default(),
            policy: PolicyConfig::default(),
            remediation: RemediationConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
            notify: NotifyConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl WardenConfig {
    pub fn load(path: impl AsRef<Path>) -> WardenResult<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| WardenError::Config(format!("Failed to read config: {}", e)))?;
            Self::from_toml(&contents)?
        } else {
            info!("Config file {:?} not found, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> WardenResult<Self> {
        toml::from_str(contents)
            .map_err(|e| WardenError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> WardenResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| WardenError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| WardenError::Config(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path.as_ref(), contents)
            .map_err(|e| WardenError::Config(format!("Failed to write config: {}", e)))?;

        info!("Configuration saved to {:?}", path.as_ref());
        Ok(())
    }

    pub fn state_path(&self) -> PathBuf {
        self.state_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join(STATE_FILE_NAME))
    }

    pub fn lock_path(&self) -> PathBuf {
        let state = self.state_path();
        match state.parent() {
            Some(parent) => parent.join(LOCK_FILE_NAME),
            None => PathBuf::from(LOCK_FILE_NAME),
        }
    }

    pub fn diagnostics_dir(&self) -> PathBuf {
        self.diagnostics
            .dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DIAGNOSTICS_DIR_NAME))
    }

    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("WARDEN_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }

        if let Ok(path) = std::env::var("WARDEN_STATE_PATH") {
            self.state_file = Some(PathBuf::from(path));
        }

        if let Ok(level) = std::env::var("WARDEN_LOG_LEVEL") {
            self.logging.level = LogLevel::parse(&level).unwrap_or_default();
        }

        if std::env::var("WARDEN_LOG_JSON").is_ok() {
            self.logging.json = true;
        }

        if let Ok(url) = std::env::var("WARDEN_WEBHOOK_URL") {
            if !url.trim().is_empty() {
                self.notify.webhook_url = Some(url);
            }
        }

        if let Ok(secs) = std::env::var("WARDEN_COOLDOWN_SECS") {
            if let Ok(s) = secs.parse() {
                self.policy.cooldown_secs = s;
            }
        }

        if let Ok(attempts) = std::env::var("WARDEN_MAX_ATTEMPTS") {
            if let Ok(a) = attempts.parse() {
                self.policy.max_attempts = a;
            }
        }

        if let Ok(secs) = std::env::var("WARDEN_SETTLE_SECS") {
            if let Ok(s) = secs.parse() {
                self.policy.settle_secs = s;
            }
        }
    }

    pub fn validate(&self) -> WardenResult<()> {
        if self.service.name.trim().is_empty() {
            return Err(WardenError::Config("Service name cannot be empty".into()));
        }

        if self.service.tick_interval_secs == 0 {
            return Err(WardenError::Config("Tick interval cannot be 0".into()));
        }

        if self.probes.checks.is_empty() {
            return Err(WardenError::Config("At least one probe must be configured".into()));
        }

        if self.probes.tick_ceiling_secs == 0 {
            return Err(WardenError::Config("Tick ceiling cannot be 0".into()));
        }

        self.validate_probe_timeout("probes.timeout_secs", self.probes.timeout_secs)?;

        let mut names = HashSet::new();
        for probe in &self.probes.checks {
            if probe.name.trim().is_empty() {
                return Err(WardenError::Config("Probe name cannot be empty".into()));
            }
            if !names.insert(probe.name.as_str()) {
                return Err(WardenError::Config(format!(
                    "Duplicate probe name: {}",
                    probe.name
                )));
            }
            if let Some(timeout) = probe.timeout_secs {
                self.validate_probe_timeout(&probe.name, timeout)?;
            }
            Self::validate_check(&probe.name, &probe.check)?;
        }

        for kind in REQUIRED_PROBE_KINDS {
            if !self.probes.checks.iter().any(|p| p.check.kind() == kind) {
                return Err(WardenError::Config(format!(
                    "At least one {} probe must be configured",
                    kind
                )));
            }
        }

        if self.policy.max_attempts == 0 {
            return Err(WardenError::Config("max_attempts must be at least 1".into()));
        }

        if self.remediation.restart_command.is_empty() {
            return Err(WardenError::Config("remediation.restart_command cannot be empty".into()));
        }

        if self.remediation.timeout_secs == 0 {
            return Err(WardenError::Config("remediation.timeout_secs cannot be 0".into()));
        }

        if self.diagnostics.keep_snapshots == 0 {
            return Err(WardenError::Config(
                "diagnostics.keep_snapshots must be at least 1".into(),
            ));
        }

        if matches!(self.diagnostics.log_command, Some(ref cmd) if cmd.is_empty()) {
            return Err(WardenError::Config("diagnostics.log_command cannot be empty".into()));
        }

        if let Some(ref url) = self.notify.webhook_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WardenError::Config(format!("Invalid webhook URL: {}", url)));
            }
        }

        if matches!(self.notify.command, Some(ref cmd) if cmd.is_empty()) {
            return Err(WardenError::Config("notify.command cannot be empty".into()));
        }

        if self.notify.webhook_url.is_none() && self.notify.command.is_none() {
            warn!("No notification target configured; alerts will only be logged");
        }

        Ok(())
    }

    fn validate_probe_timeout(&self, name: &str, timeout_secs: u64) -> WardenResult<()> {
        if timeout_secs == 0 {
            return Err(WardenError::Config(format!("{}: probe timeout cannot be 0", name)));
        }
        if timeout_secs > self.probes.tick_ceiling_secs {
            return Err(WardenError::Config(format!(
                "{}: probe timeout {}s exceeds tick ceiling {}s",
                name, timeout_secs, self.probes.tick_ceiling_secs
            )));
        }
        Ok(())
    }

    fn validate_check(name: &str, check: &ProbeCheck) -> WardenResult<()> {
        if let Some((warning, critical)) = check.thresholds() {
            for value in [warning, critical] {
                if !(value > 0.0 && value <= 100.0) {
                    return Err(WardenError::Config(format!(
                        "{}: threshold {} must be within (0, 100]",
                        name, value
                    )));
                }
            }
            if warning >= critical {
                return Err(WardenError::Config(format!(
                    "{}: warning threshold {} must be below critical threshold {}",
                    name, warning, critical
                )));
            }
        }

        if matches!(check.command(), Some(cmd) if cmd.is_empty()) {
            return Err(WardenError::Config(format!("{}: command cannot be empty", name)));
        }

        match check {
            ProbeCheck::Http { url, .. } => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(WardenError::Config(format!("{}: invalid URL {}", name, url)));
                }
            }
            ProbeCheck::Tcp { address } | ProbeCheck::Redis { address } => {
                if address.rsplit_once(':').map_or(true, |(_, port)| port.parse::<u16>().is_err()) {
                    return Err(WardenError::Config(format!(
                        "{}: address must be host:port, got {}",
                        name, address
                    )));
                }
            }
            ProbeCheck::Process { process } if process.trim().is_empty() => {
                return Err(WardenError::Config(format!("{}: process name cannot be empty", name)));
            }
            _ => {}
        }

        Ok(())
    }
}
