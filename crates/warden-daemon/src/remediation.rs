use async_trait::async_trait;
use std::time::Duration;
use tracing::info;
use warden_types::{WardenError, WardenResult};

use crate::command::run_command;
use crate::config::RemediationConfig;

#[async_trait]
pub trait Remediator: Send + Sync {
    async fn restart(&self) -> WardenResult<()>;
}

/// Restarts the managed service through its process manager, e.g.
/// `docker restart app` or `systemctl restart app`.
pub struct CommandRemediator {
    command: Vec<String>,
    timeout: Duration,
}

impl CommandRemediator {
    pub fn new(command: Vec<String>, timeout: Duration) -> Self {
        Self { command, timeout }
    }

    pub fn from_config(config: &RemediationConfig) -> Self {
        Self::new(config.restart_command.clone(), config.timeout())
    }
}

#[async_trait]
impl Remediator for CommandRemediator {
    async fn restart(&self) -> WardenResult<()> {
        info!("Restarting service: {}", self.command.join(" "));

        let output = run_command(&self.command, &[], self.timeout)
            .await
            .map_err(|e| WardenError::Remediation(e.to_string()))?;

        if output.success() {
            Ok(())
        } else {
            Err(WardenError::Remediation(format!(
                "'{}' failed with {}",
                self.command.join(" "),
                output.describe_failure()
            )))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".into(), "-c".into(), script.into()]
    }

    #[tokio::test]
    async fn test_restart_success() {
        let remediator = CommandRemediator::new(sh("exit 0"), Duration::from_secs(5));
        assert!(remediator.restart().await.is_ok());
    }

    #[tokio::test]
    async fn test_restart_failure_is_remediation_error() {
        let remediator = CommandRemediator::new(
            sh("echo 'no such container' >&2; exit 1"),
            Duration::from_secs(5),
        );
        match remediator.restart().await {
            Err(WardenError::Remediation(msg)) => assert!(msg.contains("no such container")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_restart_timeout_is_remediation_error() {
        let remediator = CommandRemediator::new(sh("sleep 5"), Duration::from_millis(100));
        assert!(matches!(
            remediator.restart().await,
            Err(WardenError::Remediation(_))
        ));
    }
}
