use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// The local clock reports a time before the UNIX epoch.
    #[error("System time error: {0}")]
    SystemTime(String),
}
