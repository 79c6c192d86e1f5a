//! Fundata data-service REST API client.
//!
//! This crate provides a signed client for the Fundata API with:
//!
//! - **Request signing**: Every call carries the `Accept-Api*` header set
//! - **Consistent arguments**: The query string (GET) or form body (POST) is
//!   encoded from exactly the pairs that were signed
//! - **Envelope decoding**: Every endpoint answers `{retcode, message, data}`
//! - **One-time initialization**: An optional process-wide client, first-wins
//!
//! Calls are blocking and perform a single round trip. There are no retries.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ApiCredentials, ParameterSet};
//! use fundata_rest::FundataClient;
//!
//! let client = FundataClient::new(ApiCredentials::from_env()?)?;
//!
//! let params = ParameterSet::new().with("page", 1).with("limit", 10);
//! let envelope = client.get("/data-service/dota2/pro/league/ti/rank-player", &params)?;
//!
//! if envelope.is_success() {
//!     println!("{}", envelope.data);
//! }
//! ```

mod client;
mod config;
mod envelope;
mod error;
mod global;

pub use client::FundataClient;
pub use config::FundataConfig;
pub use envelope::{decode_envelope, ResponseEnvelope};
pub use error::FundataError;
pub use global::{global_client, init_client};

// Clients are shared across threads.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<FundataClient>;
    let _ = assert_send_sync::<FundataError>;
};
