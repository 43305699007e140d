use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use warden_types::{Severity, WardenError, WardenResult};

use super::alert::Alert;
use crate::command::run_command;

/// Delivery target for alerts. One call is one delivery attempt.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, alert: &Alert) -> WardenResult<()>;

    fn describe(&self) -> String;
}

pub struct WebhookSink {
    client: Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: String, timeout: Duration) -> WardenResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WardenError::Notification(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    async fn deliver(&self, alert: &Alert) -> WardenResult<()> {
        debug!("HTTP POST: {}", self.url);
        let response = self
            .client
            .post(&self.url)
            .json(alert)
            .send()
            .await
            .map_err(|e| WardenError::Notification(format!("Webhook POST failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(WardenError::Notification(format!(
                "Webhook answered {}",
                status.as_u16()
            )))
        }
    }

    fn describe(&self) -> String {
        format!("webhook {}", self.url)
    }
}

/// Runs `command <severity> <message>` with the alert also exported as
/// `WARDEN_*` environment variables.
pub struct CommandSink {
    command: Vec<String>,
    timeout: Duration,
}

impl CommandSink {
    pub fn new(command: Vec<String>, timeout: Duration) -> Self {
        Self { command, timeout }
    }
}

#[async_trait]
impl NotificationSink for CommandSink {
    async fn deliver(&self, alert: &Alert) -> WardenResult<()> {
        let mut argv = self.command.clone();
        argv.push(alert.severity.to_string());
        argv.push(alert.message.clone());

        let severity = alert.severity.to_string();
        let from = alert.from.to_string();
        let to = alert.to.to_string();
        let envs = [
            ("WARDEN_SEVERITY", severity.as_str()),
            ("WARDEN_MESSAGE", alert.message.as_str()),
            ("WARDEN_SERVICE", alert.service.as_str()),
            ("WARDEN_FROM", from.as_str()),
            ("WARDEN_TO", to.as_str()),
        ];

        let output = run_command(&argv, &envs, self.timeout)
            .await
            .map_err(|e| WardenError::Notification(e.to_string()))?;
        if output.success() {
            Ok(())
        } else {
            Err(WardenError::Notification(format!(
                "'{}' failed with {}",
                self.command.join(" "),
                output.describe_failure()
            )))
        }
    }

    fn describe(&self) -> String {
        format!("command {}", self.command.join(" "))
    }
}

pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn deliver(&self, alert: &Alert) -> WardenResult<()> {
        match alert.severity {
            Severity::Info => info!("[{}] {}", alert.severity, alert.message),
            Severity::Warning => warn!("[{}] {}", alert.severity, alert.message),
            Severity::Alert => error!("[{}] {}", alert.severity, alert.message),
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "log".into()
    }
}
