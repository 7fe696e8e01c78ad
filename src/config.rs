//! Connector configuration
//!
//! Holds the Harvest credentials and client settings. Configuration is an
//! explicit value handed to the connector; it can be loaded from YAML or
//! JSON.
//!
//! ```yaml
//! access_token: "1234.pt.abcd"
//! account_id: "987654"
//! timeout_secs: 30
//! rate_limit:
//!   requests: 100
//!   per_seconds: 15
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default Harvest API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.harvestapp.com/v2";

/// Media type sent as `Content-Type` and `Accept`
pub const JSON_MEDIA_TYPE: &str = "application/json";

// ============================================================================
// Harvest Config
// ============================================================================

/// Configuration for a Harvest connector
#[derive(Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Personal access token or OAuth2 token
    pub access_token: String,

    /// Harvest account identifier
    #[serde(default)]
    pub account_id: Option<String>,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Client-side rate limit (`None` disables it)
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimitConfig>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("solidafy-harvest/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

#[allow(clippy::unnecessary_wraps)]
fn default_rate_limit() -> Option<RateLimitConfig> {
    Some(RateLimitConfig::default())
}

/// Request budget: `requests` per `per_seconds`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed per window
    pub requests: u32,
    /// Window length in seconds
    pub per_seconds: u64,
}

impl Default for RateLimitConfig {
    /// Harvest allows 100 requests per 15 seconds
    fn default() -> Self {
        Self {
            requests: 100,
            per_seconds: 15,
        }
    }
}

impl HarvestConfig {
    /// Create a config with defaults for everything but the token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            account_id: None,
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            rate_limit: default_rate_limit(),
        }
    }

    /// Set the account id
    #[must_use]
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Disable client-side rate limiting
    #[must_use]
    pub fn without_rate_limit(mut self) -> Self {
        self.rate_limit = None;
        self
    }

    /// Load a config file; `.json` is parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse and validate a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields and value ranges
    pub fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(Error::missing_field("access_token"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        if let Some(limit) = &self.rate_limit {
            if limit.requests == 0 || limit.per_seconds == 0 {
                return Err(Error::config(
                    "rate_limit requests and per_seconds must be greater than zero",
                ));
            }
        }
        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Headers sent with every request
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![(
            "Authorization".to_string(),
            format!("Bearer {}", self.access_token),
        )];
        if let Some(account_id) = &self.account_id {
            headers.push(("Harvest-Account-ID".to_string(), account_id.clone()));
        }
        headers.push(("User-Agent".to_string(), self.user_agent.clone()));
        headers.push(("Content-Type".to_string(), JSON_MEDIA_TYPE.to_string()));
        headers.push(("Accept".to_string(), JSON_MEDIA_TYPE.to_string()));
        headers
    }
}

impl std::fmt::Debug for HarvestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarvestConfig")
            .field("access_token", &"***")
            .field("account_id", &self.account_id)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}
