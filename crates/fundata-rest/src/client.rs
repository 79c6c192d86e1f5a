//! Fundata REST API client.

use crate::config::FundataConfig;
use crate::envelope::{decode_envelope, ResponseEnvelope};
use crate::error::FundataError;
use auth::{
    canonical_join, unix_time_secs, ApiCredentials, AuthHeaders, ParameterSet, RequestSigner,
};
use rest_client::{RestClient, RestError, RestResponse};

/// Sent on every request, including form-encoded POSTs. The service expects it.
const CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// Fundata API client with request signing.
///
/// Holds the credentials and a pooled transport. Cheap to clone.
#[derive(Clone)]
pub struct FundataClient {
    client: RestClient,
    credentials: ApiCredentials,
}

impl FundataClient {
    /// Create a new client against the default host.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: ApiCredentials) -> Result<Self, FundataError> {
        Self::with_config(credentials, FundataConfig::default())
    }

    /// Create a new client with explicit transport configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_config(
        credentials: ApiCredentials,
        config: FundataConfig,
    ) -> Result<Self, FundataError> {
        let client = RestClient::new(
            &config.base_url,
            config.connect_timeout,
            config.request_timeout,
        )?;

        tracing::debug!(
            base_url = %client.base_url(),
            api_key = %credentials.api_key(),
            "Fundata client created"
        );

        Ok(Self {
            client,
            credentials,
        })
    }

    /// Get the API key (for logging/debugging).
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Get the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// A signer over this client's credentials.
    pub fn signer(&self) -> RequestSigner<'_> {
        RequestSigner::new(&self.credentials)
    }

    /// Signed GET request.
    ///
    /// Parameters are signed in canonical form and sent URL-encoded in
    /// the query string.
    ///
    /// # Errors
    /// Transport, body read and envelope decode failures are returned as-is.
    pub fn get(
        &self,
        uri_path: &str,
        params: &ParameterSet,
    ) -> Result<ResponseEnvelope, FundataError> {
        self.get_at(uri_path, params, unix_time_secs()?)
    }

    /// Signed POST request.
    ///
    /// Parameters are signed in canonical form and sent as a form-encoded
    /// body built from the same pairs.
    ///
    /// # Errors
    /// Transport, body read and envelope decode failures are returned as-is.
    pub fn post(
        &self,
        uri_path: &str,
        params: &ParameterSet,
    ) -> Result<ResponseEnvelope, FundataError> {
        self.post_at(uri_path, params, unix_time_secs()?)
    }

    /// GET signed at a fixed Unix time.
    pub(crate) fn get_at(
        &self,
        uri_path: &str,
        params: &ParameterSet,
        unix_secs: u64,
    ) -> Result<ResponseEnvelope, FundataError> {
        let (auth, query) = self.sign_and_encode(uri_path, params, unix_secs)?;
        let headers = request_headers(&auth);

        tracing::debug!(uri = %uri_path, params = params.len(), "Fundata GET");

        let response = self.client.get(uri_path, Some(&query), Some(&headers))?;
        handle_response(uri_path, response)
    }

    /// POST signed at a fixed Unix time.
    pub(crate) fn post_at(
        &self,
        uri_path: &str,
        params: &ParameterSet,
        unix_secs: u64,
    ) -> Result<ResponseEnvelope, FundataError> {
        let (auth, body) = self.sign_and_encode(uri_path, params, unix_secs)?;
        let headers = request_headers(&auth);

        tracing::debug!(uri = %uri_path, params = params.len(), "Fundata POST");

        let response = self.client.post(uri_path, body, Some(&headers))?;
        handle_response(uri_path, response)
    }

    /// Render the parameters once; sign the canonical join and URL-encode
    /// the same pairs for the query string or form body.
    fn sign_and_encode(
        &self,
        uri_path: &str,
        params: &ParameterSet,
        unix_secs: u64,
    ) -> Result<(AuthHeaders, String), FundataError> {
        let pairs = params.rendered_pairs();
        let auth = self
            .signer()
            .sign_canonical_at(uri_path, &canonical_join(&pairs), unix_secs);
        let encoded = encode_pairs(&pairs)?;
        Ok((auth, encoded))
    }
}

fn encode_pairs(pairs: &[(String, String)]) -> Result<String, FundataError> {
    serde_urlencoded::to_string(pairs).map_err(|e| FundataError::InvalidRequest(e.to_string()))
}

fn request_headers(auth: &AuthHeaders) -> [(&str, &str); 5] {
    let [key, nonce, time, sign] = auth.pairs();
    [key, nonce, time, sign, CONTENT_TYPE]
}

/// Decode the envelope, whatever the status, as long as the body parses.
fn handle_response(
    uri_path: &str,
    response: RestResponse,
) -> Result<ResponseEnvelope, FundataError> {
    match decode_envelope(&response.body) {
        Ok(envelope) => {
            if !response.is_success() {
                tracing::warn!(
                    uri = %uri_path,
                    status = response.status,
                    retcode = envelope.retcode,
                    message = %envelope.message,
                    "Non-success status with envelope"
                );
            }
            Ok(envelope)
        }
        Err(_) if !response.is_success() => {
            tracing::warn!(
                uri = %uri_path,
                status = response.status,
                body = %response.body_text(),
                "Request failed without envelope"
            );
            Err(RestError::HttpError {
                status: response.status,
                message: response.body_text().into_owned(),
            }
            .into())
        }
        Err(e) => {
            tracing::warn!(
                uri = %uri_path,
                body = %response.body_text(),
                error = %e,
                "Failed to parse response"
            );
            Err(e)
        }
    }
}

impl std::fmt::Debug for FundataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FundataClient")
            .field("base_url", &self.client.base_url())
            .field("api_key", &self.credentials.api_key())
            .finish()
    }
}
