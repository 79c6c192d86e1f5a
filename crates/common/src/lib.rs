//! Shared process setup for Fundata binaries.

mod logging;

pub use logging::{init_logging, init_logging_with};
