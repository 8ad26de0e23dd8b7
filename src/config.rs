//! Configuration types for talking to the TranslateAnyPDF API.
//!
//! Every request knob lives in [`ClientConfig`], built via its
//! [`ClientConfigBuilder`]. The defaults mirror the service's published
//! client behaviour: 10 s connect / 60 s read for API calls, 10 s / 120 s for
//! the CDN download, three attempts on timeout with a 5 s linear backoff, and
//! a 60 × 5 s poll budget.
//!
//! Tests and embedders shrink the timing knobs through the builder; nothing
//! else in the crate hard-codes a duration.

use crate::error::AnyPdfError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Host name of the API on RapidAPI, sent as `X-RapidAPI-Host`.
pub const RAPIDAPI_HOST: &str = "translateanypdf.p.rapidapi.com";

/// Default base URL for every API call.
pub const DEFAULT_BASE_URL: &str = "https://translateanypdf.p.rapidapi.com";

/// Configuration shared by every operation of the client.
///
/// Built via [`ClientConfig::builder()`].
///
/// # Example
/// ```rust
/// use anypdf_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::builder()
///     .api_key("my-rapidapi-key")
///     .poll_interval(Duration::from_secs(2))
///     .build()
///     .unwrap();
/// assert_eq!(config.max_polls, 60);
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// RapidAPI key, sent as `X-RapidAPI-Key`. Required.
    pub api_key: String,

    /// Scheme and host every endpoint path is appended to.
    pub base_url: String,

    /// Value of the `X-RapidAPI-Host` header.
    pub rapidapi_host: String,

    /// Connect timeout for API calls. Default: 10 s.
    pub connect_timeout: Duration,

    /// Read timeout for API calls. Default: 60 s.
    ///
    /// Uploads of large PDFs are the slow path here; status and analyze calls
    /// answer in well under a second.
    pub read_timeout: Duration,

    /// Connect timeout for the CDN download. Default: 10 s.
    pub download_connect_timeout: Duration,

    /// Read timeout for the CDN download. Default: 120 s.
    pub download_read_timeout: Duration,

    /// Total attempts per API call when the call times out. Default: 3.
    pub max_attempts: u32,

    /// Backoff unit between timeout retries. Default: 5 s.
    ///
    /// The wait before attempt `n + 1` is `retry_backoff × n`: 5 s, then 10 s.
    pub retry_backoff: Duration,

    /// Maximum number of status polls per job. Default: 60.
    pub max_polls: u32,

    /// Delay between two status polls. Default: 5 s.
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            rapidapi_host: RAPIDAPI_HOST.to_string(),
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(60),
            download_connect_timeout: Duration::from_secs(10),
            download_read_timeout: Duration::from_secs(120),
            max_attempts: 3,
            retry_backoff: Duration::from_secs(5),
            max_polls: 60,
            poll_interval: Duration::from_secs(5),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("rapidapi_host", &self.rapidapi_host)
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("download_connect_timeout", &self.download_connect_timeout)
            .field("download_read_timeout", &self.download_read_timeout)
            .field("max_attempts", &self.max_attempts)
            .field("retry_backoff", &self.retry_backoff)
            .field("max_polls", &self.max_polls)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn rapidapi_host(mut self, host: impl Into<String>) -> Self {
        self.config.rapidapi_host = host.into();
        self
    }

    pub fn connect_timeout(mut self, t: Duration) -> Self {
        self.config.connect_timeout = t;
        self
    }

    pub fn read_timeout(mut self, t: Duration) -> Self {
        self.config.read_timeout = t;
        self
    }

    pub fn download_connect_timeout(mut self, t: Duration) -> Self {
        self.config.download_connect_timeout = t;
        self
    }

    pub fn download_read_timeout(mut self, t: Duration) -> Self {
        self.config.download_read_timeout = t;
        self
    }

    pub fn max_attempts(mut self, n: u32) -> Self {
        self.config.max_attempts = n;
        self
    }

    pub fn retry_backoff(mut self, unit: Duration) -> Self {
        self.config.retry_backoff = unit;
        self
    }

    pub fn max_polls(mut self, n: u32) -> Self {
        self.config.max_polls = n;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, AnyPdfError> {
        let c = &self.config;
        if c.api_key.trim().is_empty() {
            return Err(AnyPdfError::MissingApiKey);
        }
        if !(c.base_url.starts_with("http://") || c.base_url.starts_with("https://")) {
            return Err(AnyPdfError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got '{}'",
                c.base_url
            )));
        }
        if c.max_attempts == 0 {
            return Err(AnyPdfError::InvalidConfig(
                "max_attempts must be ≥ 1".into(),
            ));
        }
        if c.max_polls == 0 {
            return Err(AnyPdfError::InvalidConfig("max_polls must be ≥ 1".into()));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Processing tier offered by the service.
///
/// The tier selects the submission endpoint (`/translate/{tier}`) and with it
/// the cost and page limits that apply to the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Small,
    Medium,
    Large,
}

impl Tier {
    /// Path segment used by the submission endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Small => "small",
            Tier::Medium => "medium",
            Tier::Large => "large",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = AnyPdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(Tier::Small),
            "medium" => Ok(Tier::Medium),
            "large" => Ok(Tier::Large),
            _ => Err(AnyPdfError::InvalidTier(s.to_string())),
        }
    }
}
