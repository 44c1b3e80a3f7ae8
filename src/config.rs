//! Symbol server configuration
//!
//! All tunables the workflow needs are gathered in [`SymbolsConfig`], which is
//! built once and handed to every component by reference.

use chrono::NaiveDate;
use reqwest::{Client, Url};
use std::time::Duration;

/// Default symbol server
pub const SYMBOLS_URL: &str = "https://symbols.mozilla.org/";

/// Uploaded files search endpoint, relative to the server root
pub const FILES_ENDPOINT: &str = "/api/uploads/files/content/";

/// Seconds to wait for any single request to complete
pub const CONNECTION_TIMEOUT_SECS: u64 = 120;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("sym-sizes/", env!("CARGO_PKG_VERSION"));

/// Default start of the created-at window (inclusive)
pub const DEFAULT_CREATED_AFTER: &str = "2022-10-21";

/// Default end of the created-at window (exclusive)
pub const DEFAULT_CREATED_BEFORE: &str = "2022-10-23";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Base URL could not be parsed or joined
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Date could not be parsed
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Window end is not after its start
    #[error("created-at window is empty: {start} is not before {end}")]
    EmptyWindow {
        /// Window start
        start: NaiveDate,
        /// Window end
        end: NaiveDate,
    },

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    ClientError(String),
}

/// Date range restricting catalog results by upload creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl CreatedWindow {
    /// Create a window covering `start` (inclusive) up to `end` (exclusive)
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ConfigError> {
        if start >= end {
            return Err(ConfigError::EmptyWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse a window from two YYYY-MM-DD dates
    pub fn parse(start: &str, end: &str) -> Result<Self, ConfigError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Window start (inclusive)
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Window end (exclusive)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Bounds in the catalog's filter syntax, e.g. `[">=2022-10-21", "<2022-10-23"]`
    pub fn query_bounds(&self) -> [String; 2] {
        [
            format!(">={}", self.start.format("%Y-%m-%d")),
            format!("<{}", self.end.format("%Y-%m-%d")),
        ]
    }
}

impl Default for CreatedWindow {
    fn default() -> Self {
        // Both constants are valid dates with start < end.
        Self::parse(DEFAULT_CREATED_AFTER, DEFAULT_CREATED_BEFORE)
            .unwrap_or_else(|e| panic!("default created-at window is invalid: {e}"))
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidDate(input.to_string()))
}

/// Immutable symbol server configuration
#[derive(Debug, Clone)]
pub struct SymbolsConfig {
    base_url: Url,
    timeout: Duration,
    user_agent: String,
    created_window: CreatedWindow,
}

impl SymbolsConfig {
    /// Create a configuration for the given server base URL
    ///
    /// A missing trailing slash is added so that keys join underneath the base
    /// path instead of replacing its last segment.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| ConfigError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(CONNECTION_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            created_window: CreatedWindow::default(),
        })
    }

    /// Replace the created-at window
    pub fn with_created_window(mut self, window: CreatedWindow) -> Self {
        self.created_window = window;
        self
    }

    /// Replace the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Server base URL (always ends in `/`)
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// User agent header value
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Created-at window for catalog queries
    pub fn created_window(&self) -> CreatedWindow {
        self.created_window
    }

    /// Absolute URL of the uploaded files search endpoint
    pub fn files_url(&self) -> Result<Url, ConfigError> {
        self.base_url
            .join(FILES_ENDPOINT)
            .map_err(|e| ConfigError::InvalidUrl(format!("{FILES_ENDPOINT}: {e}")))
    }

    /// Absolute download URL of a normalized storage key
    pub fn download_url(&self, key: &str) -> Result<Url, ConfigError> {
        self.base_url
            .join(key)
            .map_err(|e| ConfigError::InvalidUrl(format!("{key}: {e}")))
    }

    /// Build the HTTP client shared by the catalog and the fetcher
    ///
    /// Decompression stays disabled so the fetcher can observe transmitted sizes.
    pub fn build_http_client(&self) -> Result<Client, ConfigError> {
        Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::ClientError(e.to_string()))
    }
}

impl Default for SymbolsConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(SYMBOLS_URL)
                .unwrap_or_else(|e| panic!("default symbols URL is invalid: {e}")),
            timeout: Duration::from_secs(CONNECTION_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            created_window: CreatedWindow::default(),
        }
    }
}
