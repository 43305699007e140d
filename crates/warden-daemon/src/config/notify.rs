use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::constants::{DEFAULT_NOTIFY_RETRY_DELAY_SECS, DEFAULT_NOTIFY_TIMEOUT_SECS};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub webhook_url: Option<String>,
    pub command: Option<Vec<String>>,
    pub timeout_secs: u64,
    pub retry_delay_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            command: None,
            timeout_secs: DEFAULT_NOTIFY_TIMEOUT_SECS,
            retry_delay_secs: DEFAULT_NOTIFY_RETRY_DELAY_SECS,
        }
    }
}

impl NotifyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}
