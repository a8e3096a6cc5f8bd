use thiserror::Error;

use apiwrap_interface::{BoxError, Error as ErrorImpl};

use crate::json::FromJsonError;

/// Errors produced while building, sending or decoding a request.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be built, e.g. more than one body kind was given.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// The driver does not recognize the input as a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The driver could not reach the remote host.
    #[error("Connection failed: {0}")]
    ConnectionFailed(#[source] BoxError),
    /// The exchange did not finish within the effective timeout.
    #[error("Request is not finished within timeout")]
    Timeout,
    /// Any other driver failure.
    #[error("Driver error: {0}")]
    Driver(#[source] BoxError),
    /// The response body is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON document does not fit the requested type.
    #[error(transparent)]
    FromJson(#[from] FromJsonError),
    /// An error raised by user code such as middleware or authentication.
    #[error("{0}")]
    Custom(BoxError),
}

impl Error {
    /// Wraps an arbitrary error raised by user code.
    pub fn custom(err: impl Into<BoxError>) -> Self {
        Self::Custom(err.into())
    }

    /// Whether this error was reported by the driver rather than by decoding or user code.
    pub fn is_driver_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_) | Self::ConnectionFailed(_) | Self::Timeout | Self::Driver(_)
        )
    }
}

/// A `Result` alias where the `Err` case is [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl From<ErrorImpl> for Error {
    fn from(e: ErrorImpl) -> Self {
        match e {
            ErrorImpl::InvalidUrl(url) => Self::InvalidUrl(url),
            ErrorImpl::ConnectionFailed(e) => Self::ConnectionFailed(e),
            ErrorImpl::Timeout => Self::Timeout,
            ErrorImpl::Other(e) => Self::Driver(e),
        }
    }
}
