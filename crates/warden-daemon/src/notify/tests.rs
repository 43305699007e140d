use super::*;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use warden_types::{HealthClassification, Severity, WardenError, WardenResult};

use crate::config::NotifyConfig;

/// Fails the first `failures` deliveries, then records every alert.
struct FlakySink {
    failures: Mutex<u32>,
    delivered: Arc<Mutex<Vec<Alert>>>,
}

#[async_trait]
impl NotificationSink for FlakySink {
    async fn deliver(&self, alert: &Alert) -> WardenResult<()> {
        let mut failures = self.failures.lock();
        if *failures > 0 {
            *failures -= 1;
            return Err(WardenError::Notification("sink unavailable".into()));
        }
        self.delivered.lock().push(alert.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "flaky".into()
    }
}

fn flaky_notifier(failures: u32) -> (Notifier, Arc<Mutex<Vec<Alert>>>) {
    let delivered = Arc::new(Mutex::new(Vec::new()));
    let sink = FlakySink {
        failures: Mutex::new(failures),
        delivered: delivered.clone(),
    };
    (Notifier::new(Box::new(sink), Duration::ZERO), delivered)
}

fn context() -> AlertContext {
    AlertContext {
        service: "app".into(),
        failing_probes: vec!["api".into(), "db".into()],
        ..Default::default()
    }
}

async fn capture_one_request(status_line: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request).to_string();
            if let Some((head, body)) = text.split_once("\r\n\r\n") {
                let length = head
                    .lines()
                    .find_map(|l| {
                        let lower = l.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                if body.len() >= length {
                    break;
                }
            }
        }
        let response = format!("{}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n", status_line);
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        let _ = tx.send(String::from_utf8_lossy(&request).to_string());
    });

    (addr, rx)
}

#[test]
fn test_alert_severity_and_message() {
    let alert = Alert::new(
        HealthClassification::Healthy,
        HealthClassification::Degraded,
        &context(),
        chrono::Utc::now(),
    );
    assert_eq!(alert.severity, Severity::Warning);
    assert_eq!(alert.message, "app is degraded (was healthy); failing: api, db");

    let recovered = Alert::new(
        HealthClassification::Critical,
        HealthClassification::Healthy,
        &AlertContext { service: "app".into(), ..Default::default() },
        chrono::Utc::now(),
    );
    assert_eq!(recovered.severity, Severity::Info);
    assert_eq!(recovered.message, "app recovered (critical -> healthy)");

    let improving = Alert::new(
        HealthClassification::Critical,
        HealthClassification::Degraded,
        &context(),
        chrono::Utc::now(),
    );
    assert_eq!(improving.severity, Severity::Info);
    assert_eq!(improving.message, "app is degraded (was critical); failing: api, db");
}

#[test]
fn test_escalation_message() {
    let ctx = AlertContext { escalated: true, ..context() };
    let alert = Alert::new(
        HealthClassification::Degraded,
        HealthClassification::Critical,
        &ctx,
        chrono::Utc::now(),
    );
    assert_eq!(alert.severity, Severity::Alert);
    assert!(alert.escalated);
    assert!(alert.message.contains("manual intervention required"));
}

#[tokio::test]
async fn test_notify_delivers_once() {
    let (notifier, delivered) = flaky_notifier(0);
    assert!(
        notifier
            .notify(HealthClassification::Healthy, HealthClassification::Critical, &context())
            .await
    );
    assert_eq!(delivered.lock().len(), 1);
}

#[tokio::test]
async fn test_notify_retries_once() {
    let (notifier, delivered) = flaky_notifier(1);
    assert!(
        notifier
            .notify(HealthClassification::Healthy, HealthClassification::Critical, &context())
            .await
    );
    assert_eq!(delivered.lock().len(), 1);
}

#[tokio::test]
async fn test_notify_gives_up_after_retry() {
    let (notifier, delivered) = flaky_notifier(2);
    assert!(
        !notifier
            .notify(HealthClassification::Healthy, HealthClassification::Critical, &context())
            .await
    );
    assert!(delivered.lock().is_empty());
}

#[tokio::test]
async fn test_webhook_posts_alert_json() {
    let (addr, request) = capture_one_request("HTTP/1.1 204 No Content").await;
    let sink = WebhookSink::new(format!("http://{}/hooks/warden", addr), Duration::from_secs(5))
        .unwrap();
    let alert = Alert::new(
        HealthClassification::Degraded,
        HealthClassification::Critical,
        &context(),
        chrono::Utc::now(),
    );

    sink.deliver(&alert).await.unwrap();

    let request = request.await.unwrap();
    assert!(request.starts_with("POST /hooks/warden"));
    let body = request.split_once("\r\n\r\n").unwrap().1;
    let sent: Alert = serde_json::from_str(body).unwrap();
    assert_eq!(sent, alert);
}

#[tokio::test]
async fn test_webhook_error_status() {
    let (addr, _request) = capture_one_request("HTTP/1.1 500 Internal Server Error").await;
    let sink = WebhookSink::new(format!("http://{}/", addr), Duration::from_secs(5)).unwrap();
    let alert = Alert::new(
        HealthClassification::Healthy,
        HealthClassification::Degraded,
        &context(),
        chrono::Utc::now(),
    );
    assert!(matches!(
        sink.deliver(&alert).await,
        Err(WardenError::Notification(_))
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn test_command_sink_passes_severity_and_message() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("alert.txt");
    let script = format!(
        "printf '%s|%s|%s' \"$1\" \"$WARDEN_SEVERITY\" \"$WARDEN_TO\" > {}",
        out.display()
    );
    let sink = CommandSink::new(
        vec!["sh".into(), "-c".into(), script, "notify".into()],
        Duration::from_secs(5),
    );
    let alert = Alert::new(
        HealthClassification::Healthy,
        HealthClassification::Critical,
        &context(),
        chrono::Utc::now(),
    );

    sink.deliver(&alert).await.unwrap();
    assert_eq!(std::fs::read_to_string(out).unwrap(), "alert|alert|critical");
}

#[test]
fn test_from_config_sink_choice() {
    let notifier = Notifier::from_config(&NotifyConfig::default()).unwrap();
    assert_eq!(notifier.describe(), "log");

    let config = NotifyConfig {
        command: Some(vec!["notify-send".into()]),
        ..Default::default()
    };
    assert_eq!(Notifier::from_config(&config).unwrap().describe(), "command notify-send");

    let config = NotifyConfig {
        webhook_url: Some("https://hooks.example.com/warden".into()),
        command: Some(vec!["notify-send".into()]),
        ..Default::default()
    };
    assert_eq!(
        Notifier::from_config(&config).unwrap().describe(),
        "webhook https://hooks.example.com/warden"
    );
}
