use chrono::Utc;
use std::time::Duration;
use tracing::{info, warn};
use warden_types::{HealthClassification, WardenResult};

use super::alert::{Alert, AlertContext};
use super::sinks::{CommandSink, LogSink, NotificationSink, WebhookSink};
use crate::config::NotifyConfig;

const DELIVERY_ATTEMPTS: u32 = 2;

/// Fire-and-forget delivery with a single retry.
pub struct Notifier {
    sink: Box<dyn NotificationSink>,
    retry_delay: Duration,
}

impl Notifier {
    pub fn new(sink: Box<dyn NotificationSink>, retry_delay: Duration) -> Self {
        Self { sink, retry_delay }
    }

    /// Webhook wins over command; with neither configured alerts go to the log.
    pub fn from_config(config: &NotifyConfig) -> WardenResult<Self> {
        let sink: Box<dyn NotificationSink> = if let Some(ref url) = config.webhook_url {
            Box::new(WebhookSink::new(url.clone(), config.timeout())?)
        } else if let Some(ref command) = config.command {
            Box::new(CommandSink::new(command.clone(), config.timeout()))
        } else {
            Box::new(LogSink)
        };
        Ok(Self::new(sink, config.retry_delay()))
    }

    pub fn describe(&self) -> String {
        self.sink.describe()
    }

    /// Returns whether the alert was delivered. Failures are logged only.
    pub async fn notify(
        &self,
        from: HealthClassification,
        to: HealthClassification,
        context: &AlertContext,
    ) -> bool {
        let alert = Alert::new(from, to, context, Utc::now());

        for attempt in 1..=DELIVERY_ATTEMPTS {
            match self.sink.deliver(&alert).await {
                Ok(()) => {
                    info!(
                        "Sent {} notification {} -> {} via {}",
                        alert.severity,
                        from,
                        to,
                        self.sink.describe()
                    );
                    return true;
                }
                Err(e) => {
                    warn!(
                        "Notification attempt {}/{} via {} failed: {}",
                        attempt,
                        DELIVERY_ATTEMPTS,
                        self.sink.describe(),
                        e
                    );
                    if attempt < DELIVERY_ATTEMPTS {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        warn!("Giving up on {} notification {}", alert.severity, alert.id);
        false
    }
}
