use apiwrap_interface::Error as DriverError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReqwestDriverError {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("tokio error: {0}")]
    Tokio(#[from] tokio::task::JoinError),
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),
    #[error("invalid header value for {0}")]
    InvalidHeaderValue(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("cannot read {path}: {source}")]
    Certificate {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start the managed runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl From<ReqwestDriverError> for DriverError {
    fn from(err: ReqwestDriverError) -> Self {
        match err {
            ReqwestDriverError::Reqwest(e) => {
                if e.is_timeout() {
                    DriverError::Timeout
                } else if e.is_connect() {
                    DriverError::ConnectionFailed(Box::new(e))
                } else {
                    DriverError::other(e)
                }
            }
            ReqwestDriverError::InvalidUrl(url) => DriverError::InvalidUrl(url),
            other => DriverError::other(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReqwestDriverError>;
