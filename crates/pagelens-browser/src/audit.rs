//! Performance-only audits, run remotely or with a local `lighthouse`.

use crate::config::{AuditConfig, Backend, Viewport};
use crate::{Error, Result};
use async_trait::async_trait;
use pagelens_core::audit::{AuditReport, PerformanceAuditor};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

/// Request body for the remote performance endpoint
pub fn performance_request(url: &str, viewport: Viewport) -> Value {
    json!({
        "url": url,
        "config": {
            "extends": "lighthouse:default",
            "settings": {
                "onlyCategories": ["performance"],
                "formFactor": "desktop",
                "screenEmulation": {
                    "mobile": false,
                    "width": viewport.width,
                    "height": viewport.height,
                    "deviceScaleFactor": 1,
                    "disabled": false,
                },
            },
        },
    })
}

/// Audits through the hosted rendering service
pub struct RemoteAuditor {
    client: reqwest::Client,
    endpoint: String,
    token: String,
    viewport: Viewport,
    timeout: Duration,
}

impl RemoteAuditor {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>, config: &AuditConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token: token.into(),
            viewport: config.viewport,
            timeout: config.timeout,
        }
    }

    async fn run(&self, url: &str) -> Result<AuditReport> {
        let response = self
            .client
            .post(format!("{}/performance", self.endpoint))
            .query(&[("token", self.token.as_str())])
            .json(&performance_request(url, self.viewport))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Audit(format!(
                "performance endpoint returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let value: Value = response.json().await?;
        AuditReport::from_value(value).map_err(|e| Error::Audit(e.to_string()))
    }
}

#[async_trait]
impl PerformanceAuditor for RemoteAuditor {
    async fn audit(&self, url: &str) -> pagelens_core::Result<AuditReport> {
        tracing::info!("Running remote performance audit for {}", url);
        match tokio::time::timeout(self.timeout, self.run(url)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(pagelens_core::Error::Audit(format!(
                "timed out after {}s",
                self.timeout.as_secs()
            ))),
        }
    }
}

/// Audits with the `lighthouse` CLI against a local Chrome
pub struct LocalAuditor {
    lighthouse: PathBuf,
    chrome_path: Option<PathBuf>,
    viewport: Viewport,
    timeout: Duration,
}

impl LocalAuditor {
    /// Use the configured binary or find `lighthouse` on `PATH`
    pub fn discover(config: &AuditConfig) -> Result<Self> {
        let lighthouse = match &config.lighthouse_path {
            Some(path) => path.clone(),
            None => which::which("lighthouse").map_err(|_| {
                Error::Audit("lighthouse not found on PATH; install it with `npm i -g lighthouse`".to_string())
            })?,
        };

        Ok(Self {
            lighthouse,
            chrome_path: config.chrome_path.clone(),
            viewport: config.viewport,
            timeout: config.timeout,
        })
    }

    fn args(&self, url: &str) -> Vec<String> {
        vec![
            url.to_string(),
            "--output=json".to_string(),
            "--output-path=stdout".to_string(),
            "--only-categories=performance".to_string(),
            "--preset=desktop".to_string(),
            format!("--screenEmulation.width={}", self.viewport.width),
            format!("--screenEmulation.height={}", self.viewport.height),
            "--quiet".to_string(),
            "--chrome-flags=--headless=new --no-sandbox --disable-gpu".to_string(),
        ]
    }

    async fn run(&self, url: &str) -> Result<AuditReport> {
        let mut command = tokio::process::Command::new(&self.lighthouse);
        command
            .args(self.args(url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(chrome) = &self.chrome_path {
            command.env("CHROME_PATH", chrome);
        }

        let output = command.output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Audit(format!(
                "lighthouse exited with {}: {}",
                output.status,
                stderr.trim().chars().take(200).collect::<String>()
            )));
        }

        let value: Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| Error::Audit(format!("unreadable lighthouse report: {}", e)))?;
        AuditReport::from_value(value).map_err(|e| Error::Audit(e.to_string()))
    }
}

#[async_trait]
impl PerformanceAuditor for LocalAuditor {
    async fn audit(&self, url: &str) -> pagelens_core::Result<AuditReport> {
        tracing::info!("Running local performance audit for {}", url);
        // Dropping the timed-out future kills the child process
        match tokio::time::timeout(self.timeout, self.run(url)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(pagelens_core::Error::Audit(format!(
                "timed out after {}s",
                self.timeout.as_secs()
            ))),
        }
    }
}

/// Auditor matching the configured backend
pub fn auditor_for(config: &AuditConfig) -> Result<Arc<dyn PerformanceAuditor>> {
    match &config.backend {
        Backend::Remote { endpoint, token } => {
            Ok(Arc::new(RemoteAuditor::new(endpoint.as_str(), token.as_str(), config)))
        }
        Backend::Local => Ok(Arc::new(LocalAuditor::discover(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn remote(server: &MockServer) -> RemoteAuditor {
        RemoteAuditor::new(server.uri(), "secret", &AuditConfig::default())
    }

    #[test]
    fn test_request_body_shape() {
        let body = performance_request("https://example.com", Viewport::default());
        assert_eq!(body["config"]["extends"], "lighthouse:default");
        assert_eq!(body["config"]["settings"]["onlyCategories"], json!(["performance"]));
        assert_eq!(body["config"]["settings"]["formFactor"], "desktop");
        assert_eq!(body["config"]["settings"]["screenEmulation"]["width"], 1920);
        assert_eq!(body["config"]["settings"]["screenEmulation"]["mobile"], false);
    }

    #[tokio::test]
    async fn test_remote_audit_parses_wrapped_report() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/performance"))
            .and(query_param("token", "secret"))
            .and(body_partial_json(json!({ "url": "https://example.com" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "audits": {
                        "largest-contentful-paint": { "score": 0.9, "numericValue": 1800.0 }
                    },
                    "categories": { "performance": { "score": 0.93 } }
                }
            })))
            .mount(&server)
            .await;

        let report = remote(&server).audit("https://example.com").await.unwrap();
        assert_eq!(report.performance_score(), Some(0.93));
        assert_eq!(report.numeric("largest-contentful-paint"), Some(1800.0));
    }

    #[tokio::test]
    async fn test_remote_audit_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/performance"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = remote(&server).audit("https://example.com").await.unwrap_err();
        assert!(matches!(err, pagelens_core::Error::Audit(_)));
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_remote_audit_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let config = AuditConfig {
            timeout: Duration::from_millis(100),
            ..AuditConfig::default()
        };
        let auditor = RemoteAuditor::new(server.uri(), "secret", &config);
        let err = auditor.audit("https://example.com").await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_local_args() {
        let auditor = LocalAuditor {
            lighthouse: PathBuf::from("/usr/local/bin/lighthouse"),
            chrome_path: None,
            viewport: Viewport::default(),
            timeout: Duration::from_secs(60),
        };
        let args = auditor.args("https://example.com");
        assert_eq!(args[0], "https://example.com");
        assert!(args.contains(&"--only-categories=performance".to_string()));
        assert!(args.contains(&"--output-path=stdout".to_string()));
    }

    #[tokio::test]
    async fn test_local_audit_missing_binary() {
        let config = AuditConfig {
            lighthouse_path: Some(PathBuf::from("/nonexistent/lighthouse")),
            ..AuditConfig::default()
        };
        let auditor = LocalAuditor::discover(&config).unwrap();
        assert!(auditor.audit("https://example.com").await.is_err());
    }
}
