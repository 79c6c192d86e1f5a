//! Generic REST client infrastructure.
//!
//! This crate provides a thin blocking wrapper around `reqwest` with:
//!
//! - Consistent error handling via `RestError`
//! - GET with query string and POST with a pre-encoded body
//! - Header injection for authentication
//! - Raw status + body capture, leaving body interpretation to the caller
//!
//! Each call performs exactly one round trip; nothing is retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_client::RestClient;
//! use std::time::Duration;
//!
//! let client = RestClient::new("http://api.varena.com:80", Duration::from_secs(10), Duration::from_secs(10))?;
//! let response = client.get("/data-service/ping", Some("a=1"), None)?;
//! println!("{} {}", response.status, response.body);
//! ```

mod client;
mod error;

pub use client::{RestClient, RestResponse};
pub use error::RestError;
