//! Fundata client error types.

use auth::AuthError;
use rest_client::RestError;
use thiserror::Error;

/// Errors that can occur when calling the Fundata API.
#[derive(Debug, Error)]
pub enum FundataError {
    /// REST client error (connection, timeout, body read, HTTP status).
    #[error("REST client error: {0}")]
    Rest(#[from] RestError),

    /// Signing error.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The request arguments could not be encoded.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The response body is not a valid envelope, or `data` has another shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FundataError {
    /// Check if the request never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Rest(rest_err) if rest_err.is_transport())
    }

    /// Check if this is a decode error.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
