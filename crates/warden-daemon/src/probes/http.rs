use async_trait::async_trait;
use reqwest::Client;
use warden_types::{ProbeKind, ProbeResult};

use super::Probe;

pub struct HttpProbe {
    name: String,
    client: Client,
    url: String,
    expect_status: Option<u16>,
    expect_body: Option<String>,
}

impl HttpProbe {
    pub fn new(
        name: String,
        client: Client,
        url: String,
        expect_status: Option<u16>,
        expect_body: Option<String>,
    ) -> Self {
        Self { name, client, url, expect_status, expect_body }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::HttpEndpoint
    }

    async fn check(&self) -> ProbeResult {
        let response = match self.client.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => {
                return ProbeResult::fail(
                    &self.name,
                    self.kind(),
                    format!("GET {} failed: {}", self.url, e),
                )
            }
        };

        let status = response.status();
        let status_ok = match self.expect_status {
            Some(expected) => status.as_u16() == expected,
            None => status.is_success(),
        };
        if !status_ok {
            let expected = self
                .expect_status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "2xx".into());
            return ProbeResult::fail(
                &self.name,
                self.kind(),
                format!("GET {} returned {}, expected {}", self.url, status.as_u16(), expected),
            )
            .with_measurement(status.as_u16() as f64);
        }

        if let Some(ref token) = self.expect_body {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    return ProbeResult::fail(
                        &self.name,
                        self.kind(),
                        format!("failed to read body from {}: {}", self.url, e),
                    )
                }
            };
            if !body.contains(token.as_str()) {
                return ProbeResult::fail(
                    &self.name,
                    self.kind(),
                    format!("body of {} does not contain '{}'", self.url, token),
                )
                .with_measurement(status.as_u16() as f64);
            }
        }

        ProbeResult::pass(&self.name, self.kind()).with_measurement(status.as_u16() as f64)
    }
}
