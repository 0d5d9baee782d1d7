//! Relay configuration module
//!
//! Provides the configuration types for the relay server and the remote
//! platform client. Values are assembled with `RelayConfigBuilder`; the
//! server reads them from the environment in `backend::server::config`.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://us-west-2b.online.tableau.com";
pub const DEFAULT_API_VERSION: &str = "3.22";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_PORT: u16 = 5000;

/// Relay configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Port the HTTP server listens on
    pub port: u16,
    /// Analytics platform origin, without the `/api/...` suffix
    pub base_url: Url,
    /// REST API version segment
    pub api_version: String,
    /// Site content URL used for sign-in when the client does not send one
    pub site_content_url: String,
    /// Browser origin allowed by CORS
    pub cors_allowed_origin: String,
    /// Deadline for every outbound call
    pub request_timeout: Duration,
    /// Deadline for a whole preview batch
    pub preview_batch_timeout: Duration,
    /// Maximum outstanding preview fetches
    pub preview_concurrency: usize,
    /// Maximum project nesting depth before the tree is rejected
    pub tree_max_depth: usize,
    /// Records requested per page from list endpoints
    pub page_size: u32,
}

impl RelayConfig {
    /// Create a new RelayConfigBuilder
    pub fn builder() -> RelayConfigBuilder {
        RelayConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(self.base_url.to_string()));
        }
        if self.api_version.trim().is_empty() {
            return Err(ConfigError::MissingValue("api_version"));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroValue("request_timeout"));
        }
        if self.preview_batch_timeout.is_zero() {
            return Err(ConfigError::ZeroValue("preview_batch_timeout"));
        }
        if self.preview_concurrency == 0 {
            return Err(ConfigError::ZeroValue("preview_concurrency"));
        }
        if self.tree_max_depth == 0 {
            return Err(ConfigError::ZeroValue("tree_max_depth"));
        }
        if self.page_size == 0 {
            return Err(ConfigError::ZeroValue("page_size"));
        }
        Ok(())
    }

    /// Full URL for a REST API path below `/api/{version}/`
    pub fn api_url(&self, path: &str) -> Result<Url, ConfigError> {
        let raw = format!(
            "{}/api/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.api_version,
            path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|_| ConfigError::InvalidUrl(raw))
    }
}

/// Builder for RelayConfig
#[derive(Debug, Default)]
pub struct RelayConfigBuilder {
    port: Option<u16>,
    base_url: Option<String>,
    api_version: Option<String>,
    site_content_url: Option<String>,
    cors_allowed_origin: Option<String>,
    request_timeout: Option<Duration>,
    preview_batch_timeout: Option<Duration>,
    preview_concurrency: Option<usize>,
    tree_max_depth: Option<usize>,
    page_size: Option<u32>,
}

impl RelayConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the analytics platform origin
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn site_content_url(mut self, content_url: impl Into<String>) -> Self {
        self.site_content_url = Some(content_url.into());
        self
    }

    pub fn cors_allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_allowed_origin = Some(origin.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn preview_batch_timeout(mut self, timeout: Duration) -> Self {
        self.preview_batch_timeout = Some(timeout);
        self
    }

    pub fn preview_concurrency(mut self, limit: usize) -> Self {
        self.preview_concurrency = Some(limit);
        self
    }

    pub fn tree_max_depth(mut self, depth: usize) -> Self {
        self.tree_max_depth = Some(depth);
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<RelayConfig, ConfigError> {
        let raw_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_url).map_err(|_| ConfigError::InvalidUrl(raw_url))?;

        let config = RelayConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            base_url,
            api_version: self
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            site_content_url: self.site_content_url.unwrap_or_default(),
            cors_allowed_origin: self
                .cors_allowed_origin
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            request_timeout: self.request_timeout.unwrap_or(Duration::from_secs(30)),
            preview_batch_timeout: self
                .preview_batch_timeout
                .unwrap_or(Duration::from_secs(60)),
            preview_concurrency: self.preview_concurrency.unwrap_or(8),
            tree_max_depth: self.tree_max_depth.unwrap_or(32),
            page_size: self.page_size.unwrap_or(100),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}
