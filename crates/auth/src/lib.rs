//! Authentication and signing for the Fundata data-service API.
//!
//! This crate provides credential management and the request signing
//! protocol the service expects on every call.
//!
//! # Features
//!
//! - **Secure Credentials**: The API secret is wrapped in `SecretString` to prevent
//!   accidental logging and ensure memory is zeroed on drop.
//! - **Canonical Parameters**: Parameters are rendered through a closed set of
//!   scalar kinds and joined in byte-wise key order.
//! - **MD5 Signing**: Implements the nonce and signature derivation required by
//!   the service. MD5 is mandated by the remote side for wire compatibility.
//! - **Environment Loading**: Credentials can be loaded from environment variables
//!   or a `.env` file.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ApiCredentials, ParameterSet, RequestSigner};
//!
//! let credentials = ApiCredentials::from_env()?;
//! let signer = RequestSigner::new(&credentials);
//!
//! let params = ParameterSet::new().with("page", 1).with("limit", 10);
//! let headers = signer.sign("/data-service/dota2/pro/league/ti/rank-player", &params)?;
//! ```

mod credentials;
mod error;
mod params;
mod signer;

pub use credentials::ApiCredentials;
pub use error::AuthError;
pub use params::{canonical_join, ParamValue, ParameterSet};
pub use signer::{
    digest_hex, nonce_for, signing_payload, unix_time_secs, AuthHeaders, RequestSigner,
    HEADER_API_KEY, HEADER_API_NONCE, HEADER_API_SIGN, HEADER_API_TIME,
};
