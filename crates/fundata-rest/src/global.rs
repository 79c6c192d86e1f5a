//! Process-wide client, initialized once.
//!
//! Prefer passing a [`FundataClient`] explicitly. This exists for callers that
//! want the single `init(key, secret)` entry point.

use crate::client::FundataClient;
use crate::error::FundataError;
use auth::ApiCredentials;
use std::sync::OnceLock;

static GLOBAL_CLIENT: OnceLock<FundataClient> = OnceLock::new();

/// Initialize the process-wide client with default configuration.
///
/// First call wins: once a client exists, later calls return it and their
/// arguments are ignored.
///
/// # Errors
/// Returns an error if the HTTP client cannot be built on the first call.
pub fn init_client(
    api_key: &str,
    api_secret: &str,
) -> Result<&'static FundataClient, FundataError> {
    if let Some(client) = GLOBAL_CLIENT.get() {
        tracing::debug!("Fundata client already initialized, ignoring new credentials");
        return Ok(client);
    }

    let client = FundataClient::new(ApiCredentials::new(api_key, api_secret))?;

    // A concurrent initializer may have won the race; its client is kept.
    Ok(GLOBAL_CLIENT.get_or_init(|| client))
}

/// The process-wide client, if [`init_client`] has succeeded.
pub fn global_client() -> Option<&'static FundataClient> {
    GLOBAL_CLIENT.get()
}
