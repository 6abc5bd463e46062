//! Outbound HTTP transport for the hosted inference endpoints.

use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Sends a JSON payload to an inference endpoint and returns the raw body.
///
/// Non-success statuses are not errors here: hosted models answer with an
/// `{"error": ...}` body and a 4xx/5xx status, and that body is what the
/// caller reports.
#[async_trait]
pub trait InferenceTransport: Send + Sync {
    async fn post_json(&self, url: &str, payload: &Value) -> Result<String, TransportError>;
}

/// reqwest-backed transport with bearer authentication.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    token: Option<String>,
    timeout_seconds: u64,
}

impl HttpTransport {
    /// Create a transport. An empty token is treated as no token.
    pub fn new(token: Option<String>, timeout_seconds: u64) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            token: token.filter(|t| !t.trim().is_empty()),
            timeout_seconds,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn classify(&self, url: &str, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout(self.timeout_seconds)
        } else if e.is_connect() {
            TransportError::Connect(url.to_string())
        } else {
            TransportError::Request(e)
        }
    }
}

#[async_trait]
impl InferenceTransport for HttpTransport {
    async fn post_json(&self, url: &str, payload: &Value) -> Result<String, TransportError> {
        let mut request = self.client.post(url).json(payload);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, url, "Inference endpoint returned non-success status");
        }

        let body = response.text().await.map_err(|e| self.classify(url, e))?;
        debug!(%status, bytes = body.len(), url, "Received inference response");

        Ok(body)
    }
}
