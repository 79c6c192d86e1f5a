//! Blocking REST client wrapper around reqwest.

use crate::error::RestError;
use reqwest::blocking::{Client, RequestBuilder};
use std::borrow::Cow;
use std::time::Duration;

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, exactly as received.
    pub body: Vec<u8>,
}

impl RestResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text for logs and error messages. Invalid UTF-8 is replaced.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Generic REST client for making blocking HTTP requests.
///
/// The underlying connection pool is shared, so one client can serve
/// independent requests from many threads.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    /// Create a new REST client with the given base URL.
    ///
    /// # Arguments
    /// * `base_url` - Base URL for all requests (e.g., "http://api.varena.com:80")
    /// * `connect_timeout` - Limit for establishing a connection
    /// * `request_timeout` - Limit for the whole request, body included
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, RestError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| RestError::RequestBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request.
    ///
    /// # Arguments
    /// * `path` - Request path (e.g., "/data-service/dota2/pro/league/ti/rank-player")
    /// * `query` - Optional encoded query string (without leading '?')
    /// * `headers` - Optional additional headers
    pub fn get(
        &self,
        path: &str,
        query: Option<&str>,
        headers: Option<&[(&str, &str)]>,
    ) -> Result<RestResponse, RestError> {
        let url = self.build_url(path, query);
        tracing::debug!(url = %url, "GET request");

        let request = Self::with_headers(self.client.get(&url), headers);
        Self::execute(request, &url)
    }

    /// Make a POST request.
    ///
    /// # Arguments
    /// * `path` - Request path
    /// * `body` - Pre-encoded request body
    /// * `headers` - Optional additional headers
    pub fn post(
        &self,
        path: &str,
        body: String,
        headers: Option<&[(&str, &str)]>,
    ) -> Result<RestResponse, RestError> {
        let url = self.build_url(path, None);
        tracing::debug!(url = %url, body_len = body.len(), "POST request");

        let request = Self::with_headers(self.client.post(&url), headers).body(body);
        Self::execute(request, &url)
    }

    /// Build a full URL from path and optional query string.
    fn build_url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.base_url, path, q),
            _ => format!("{}{}", self.base_url, path),
        }
    }

    fn with_headers(
        mut request: RequestBuilder,
        headers: Option<&[(&str, &str)]>,
    ) -> RequestBuilder {
        if let Some(hdrs) = headers {
            for (key, value) in hdrs {
                request = request.header(*key, *value);
            }
        }
        request
    }

    /// Send the request and read the whole body.
    fn execute(request: RequestBuilder, url: &str) -> Result<RestResponse, RestError> {
        let response = request.send().map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Request failed");
            RestError::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().map_err(|e| {
            tracing::warn!(url = %url, status = status, error = %e, "Failed to read response body");
            if e.is_timeout() {
                RestError::Timeout
            } else {
                RestError::Read(e.to_string())
            }
        })?;

        tracing::debug!(url = %url, status = status, body_len = body.len(), "Response received");

        Ok(RestResponse {
            status,
            body: body.to_vec(),
        })
    }
}
