//! Key/secret pair used to sign Fundata requests.
//!
//! The key travels in clear in `Accept-ApiKey`. The secret never leaves the
//! process; it only feeds the signature digest.

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};

const API_KEY_VAR: &str = "FUNDATA_API_KEY";
const API_SECRET_VAR: &str = "FUNDATA_API_SECRET";

/// Fundata key and secret.
///
/// Immutable once built. The secret sits in a `SecretString`, so it is
/// absent from `Debug` output and wiped when the last clone is dropped.
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    api_secret: SecretString,
}

impl ApiCredentials {
    /// Read `FUNDATA_API_KEY` and `FUNDATA_API_SECRET`.
    ///
    /// A `.env` file in the working directory is merged in first, if present.
    ///
    /// # Errors
    /// `AuthError::MissingEnvVar` names the first variable that is unset.
    pub fn from_env() -> Result<Self, AuthError> {
        dotenvy::dotenv().ok();

        let api_key = require_var(API_KEY_VAR)?;
        let api_secret = require_var(API_SECRET_VAR)?;

        Ok(Self::new(api_key, api_secret))
    }

    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Value sent in `Accept-ApiKey`.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Raw secret, the second field of the signing payload.
    ///
    /// Keep the result out of logs and error messages.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

fn require_var(name: &str) -> Result<String, AuthError> {
    std::env::var(name).map_err(|_| AuthError::MissingEnvVar(name.to_string()))
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_new() {
        let creds = ApiCredentials::new("my_api_key", "my_secret");
        assert_eq!(creds.api_key(), "my_api_key");
        assert_eq!(creds.expose_secret(), "my_secret");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = ApiCredentials::new("my_api_key", "super_secret_key");
        let debug_str = format!("{:?}", creds);

        assert!(debug_str.contains("my_api_key"));
        assert!(!debug_str.contains("super_secret_key"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_missing_var_is_named() {
        let err = require_var("FUNDATA_TEST_VAR_THAT_IS_NEVER_SET").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing environment variable: FUNDATA_TEST_VAR_THAT_IS_NEVER_SET"
        );
    }

    #[test]
    fn test_clone_keeps_secret() {
        let creds = ApiCredentials::new("k", "s");
        let cloned = creds.clone();
        assert_eq!(cloned.expose_secret(), "s");
    }
}
