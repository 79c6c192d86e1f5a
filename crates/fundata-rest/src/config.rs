//! Client configuration.

use crate::error::FundataError;
use std::time::Duration;

/// Default API host. The service listens on plain HTTP, port 80.
pub const DEFAULT_BASE_URL: &str = "http://api.varena.com:80";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const BASE_URL_VAR: &str = "FUNDATA_BASE_URL";
const CONNECT_TIMEOUT_VAR: &str = "FUNDATA_CONNECT_TIMEOUT_SECS";
const REQUEST_TIMEOUT_VAR: &str = "FUNDATA_REQUEST_TIMEOUT_SECS";

/// Transport configuration, fixed once the client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundataConfig {
    /// Scheme, host and port. Request paths are appended verbatim.
    pub base_url: String,
    /// Limit for establishing a connection.
    pub connect_timeout: Duration,
    /// Limit for the whole request, body included.
    ///
    /// The blocking transport has no separate response-header timeout, so
    /// this value also bounds the wait for response headers.
    pub request_timeout: Duration,
}

impl Default for FundataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl FundataConfig {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// Looks for:
    /// - `FUNDATA_BASE_URL`
    /// - `FUNDATA_CONNECT_TIMEOUT_SECS`
    /// - `FUNDATA_REQUEST_TIMEOUT_SECS`
    ///
    /// # Errors
    /// Returns `FundataError::Config` if a timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self, FundataError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FundataError> {
        let defaults = Self::default();

        Ok(Self {
            base_url: lookup(BASE_URL_VAR).unwrap_or(defaults.base_url),
            connect_timeout: parse_secs(CONNECT_TIMEOUT_VAR, lookup(CONNECT_TIMEOUT_VAR))?
                .unwrap_or(defaults.connect_timeout),
            request_timeout: parse_secs(REQUEST_TIMEOUT_VAR, lookup(REQUEST_TIMEOUT_VAR))?
                .unwrap_or(defaults.request_timeout),
        })
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

fn parse_secs(name: &str, value: Option<String>) -> Result<Option<Duration>, FundataError> {
    value
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| FundataError::Config(format!("{name}={raw:?}: {e}")))
        })
        .transpose()
}
