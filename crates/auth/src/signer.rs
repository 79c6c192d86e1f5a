//! Request signing for the Fundata API.
//!
//! Every request carries four headers derived from the current Unix time:
//!
//! 1. `timestamp` is the time in seconds, as decimal digits
//! 2. `nonce` is characters 8..13 of `md5_hex(timestamp)`
//! 3. `signature` is `md5_hex(nonce|secret|timestamp|uri_path|canonical_args)`
//!
//! MD5 is what the service verifies against; it is kept for wire
//! compatibility and is not a recommendation.

use crate::credentials::ApiCredentials;
use crate::error::AuthError;
use crate::params::ParameterSet;
use md5::{Digest, Md5};
use std::time::{SystemTime, UNIX_EPOCH};

/// Header carrying the public API key.
pub const HEADER_API_KEY: &str = "Accept-ApiKey";
/// Header carrying the nonce.
pub const HEADER_API_NONCE: &str = "Accept-ApiNonce";
/// Header carrying the Unix timestamp in seconds.
pub const HEADER_API_TIME: &str = "Accept-ApiTime";
/// Header carrying the signature.
pub const HEADER_API_SIGN: &str = "Accept-ApiSign";

/// Offset of the nonce inside the timestamp digest.
const NONCE_OFFSET: usize = 8;
/// Nonce length in hex characters.
const NONCE_LEN: usize = 5;

/// Authentication headers for a single request.
///
/// Derived fresh for every request and never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub key: String,
    pub nonce: String,
    pub timestamp: String,
    pub signature: String,
}

impl AuthHeaders {
    /// The four `(header name, value)` pairs to attach to the request.
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            (HEADER_API_KEY, self.key.as_str()),
            (HEADER_API_NONCE, self.nonce.as_str()),
            (HEADER_API_TIME, self.timestamp.as_str()),
            (HEADER_API_SIGN, self.signature.as_str()),
        ]
    }
}

/// MD5 digest of `input` as 32 lowercase hex characters.
pub fn digest_hex(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Nonce derived from a timestamp string.
pub fn nonce_for(timestamp: &str) -> String {
    // The digest is ASCII hex, so byte slicing is on char boundaries.
    digest_hex(timestamp)[NONCE_OFFSET..NONCE_OFFSET + NONCE_LEN].to_string()
}

/// The pipe-delimited string the signature is computed over.
///
/// Always five fields; an empty canonical string still leaves its field.
pub fn signing_payload(
    nonce: &str,
    secret: &str,
    timestamp: &str,
    uri_path: &str,
    canonical_args: &str,
) -> String {
    [nonce, secret, timestamp, uri_path, canonical_args].join("|")
}

/// Current Unix time in whole seconds.
///
/// # Errors
/// Returns `AuthError::SystemTime` if the clock is before the UNIX epoch.
pub fn unix_time_secs() -> Result<u64, AuthError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| AuthError::SystemTime(e.to_string()))
}

/// Request signer for authenticated Fundata API calls.
pub struct RequestSigner<'a> {
    credentials: &'a ApiCredentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with the given credentials.
    pub fn new(credentials: &'a ApiCredentials) -> Self {
        Self { credentials }
    }

    /// Sign a request using the current time.
    ///
    /// # Arguments
    /// * `uri_path` - Request path only, without scheme or host
    /// * `params` - Parameters sent with the request
    ///
    /// # Errors
    /// Returns `AuthError::SystemTime` if the clock is before the UNIX epoch.
    pub fn sign(&self, uri_path: &str, params: &ParameterSet) -> Result<AuthHeaders, AuthError> {
        Ok(self.sign_at(uri_path, params, unix_time_secs()?))
    }

    /// Sign a request at a fixed Unix time (seconds).
    ///
    /// Deterministic: the same inputs always give the same headers.
    pub fn sign_at(&self, uri_path: &str, params: &ParameterSet, unix_secs: u64) -> AuthHeaders {
        self.sign_canonical_at(uri_path, &params.canonical_string(), unix_secs)
    }

    /// Sign an already built canonical argument string at a fixed Unix time.
    ///
    /// `canonical` must be the `&`-joined, key-sorted, unencoded rendering
    /// (see [`crate::canonical_join`]).
    pub fn sign_canonical_at(
        &self,
        uri_path: &str,
        canonical: &str,
        unix_secs: u64,
    ) -> AuthHeaders {
        let timestamp = unix_secs.to_string();
        let nonce = nonce_for(&timestamp);

        let payload = signing_payload(
            &nonce,
            self.credentials.expose_secret(),
            &timestamp,
            uri_path,
            canonical,
        );
        let signature = digest_hex(&payload);

        tracing::trace!(
            uri = %uri_path,
            nonce = %nonce,
            timestamp = %timestamp,
            args = %canonical,
            "Signed request"
        );

        AuthHeaders {
            key: self.credentials.api_key().to_string(),
            nonce,
            timestamp,
            signature,
        }
    }
}
