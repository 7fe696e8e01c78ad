//! HTTP transport
//!
//! The connector only needs one thing from HTTP: issue a GET with a set of
//! headers and hand back the status and body. [`Transport`] is that seam;
//! [`HttpTransport`] implements it on reqwest with a request timeout and a
//! client-side rate limiter. No retries are performed.

use super::rate_limit::RateLimiter;
use crate::config::HarvestConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests on behalf of the connector
///
/// Implementations must be safe to share between tasks. Connection-level
/// failures are reported as [`Error::Transport`]; any HTTP status, including
/// error statuses, is returned as a response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` with `headers`
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse>;
}

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Rate limiter, if any
    pub rate_limiter: Option<RateLimiter>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("solidafy-harvest/{}", env!("CARGO_PKG_VERSION")),
            rate_limiter: Some(RateLimiter::default()),
        }
    }
}

impl From<&HarvestConfig> for HttpTransportConfig {
    fn from(config: &HarvestConfig) -> Self {
        Self {
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
            rate_limiter: config.rate_limit.as_ref().map(RateLimiter::new),
        }
    }
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
    rate_limiter: Option<RateLimiter>,
}

impl HttpTransport {
    /// Create a transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            rate_limiter: config.rate_limiter,
        })
    }

    /// Create a transport from connector configuration
    pub fn from_config(config: &HarvestConfig) -> Result<Self> {
        Self::with_config(HttpTransportConfig::from(config))
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.get(url);
        for (key, value) in headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            if e.is_timeout() {
                Error::transport(format!("request to {url} timed out"))
            } else {
                Error::transport(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response body: {e}")))?;

        debug!("GET {} -> {}", url, status);
        Ok(HttpResponse { status, body })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
