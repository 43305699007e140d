use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::constants::{
    DEFAULT_COOLDOWN_SECS, DEFAULT_MAX_ATTEMPTS, DEFAULT_RESTART_TIMEOUT_SECS, DEFAULT_SETTLE_SECS,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub cooldown_secs: u64,
    pub max_attempts: u32,
    pub settle_secs: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            settle_secs: DEFAULT_SETTLE_SECS,
        }
    }
}

impl PolicyConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RemediationConfig {
    pub restart_command: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for RemediationConfig {
    fn default() -> Self {
        Self {
            restart_command: vec!["systemctl".into(), "restart".into(), "app".into()],
            timeout_secs: DEFAULT_RESTART_TIMEOUT_SECS,
        }
    }
}

impl RemediationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
