//! Error types for driver operations.

use thiserror::Error;

/// Boxed error type carried by driver failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures a driver may report while performing an exchange.
#[derive(Debug, Error)]
pub enum Error {
    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The remote host could not be reached.
    #[error("Connection failed: {0}")]
    ConnectionFailed(#[source] BoxError),
    /// The request timed out before completion.
    #[error("Request is not finished within timeout")]
    Timeout,
    /// Any other failure raised by the driver.
    #[error("Driver error: {0}")]
    Other(#[source] BoxError),
}

impl Error {
    /// Wraps an arbitrary driver failure.
    pub fn other(err: impl Into<BoxError>) -> Self {
        Self::Other(err.into())
    }
}

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, Error>;
