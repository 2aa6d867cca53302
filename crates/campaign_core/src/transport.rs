//! Upstream HTTP transport

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::TransportError;
use crate::wire::{HttpMethod, UpstreamRequest};

/// Executes one assembled request and decodes the JSON answer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    async fn send(&self, request: &UpstreamRequest) -> Result<Value, TransportError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Transport with the client's default settings (no request timeout)
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Transport that gives up on a request after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::request("client", e))?;
        Ok(Self { client })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamTransport for HttpTransport {
    async fn send(&self, request: &UpstreamRequest) -> Result<Value, TransportError> {
        debug!(
            action = %request.action,
            method = ?request.method,
            params = request.params.len(),
            "Sending upstream request"
        );

        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.endpoint).query(&request.params),
            HttpMethod::Post => self.client.post(&request.endpoint).form(&request.params),
        };

        // reqwest errors carry the full URL, and GET query strings hold the api key
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::request(&request.endpoint, e.without_url()))?;

        // Status codes are not interpreted; the body decides.
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::request(&request.endpoint, e.without_url()))?;

        debug!(%status, bytes = body.len(), "Received upstream response");

        serde_json::from_str(&body).map_err(|e| TransportError::decode(&request.endpoint, e, body))
    }
}
