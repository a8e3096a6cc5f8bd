//! Client configuration.
//!
//! A [`ClientBuilder`] collects the per-client defaults (timeout, TLS verification,
//! client certificate) and the user middleware, then produces a
//! [`BlockingClient`](crate::BlockingClient) or [`AsyncClient`](crate::AsyncClient)
//! around a driver.

mod builder;

pub use apiwrap_interface::client::{
    ClientCert, FetchOptions, Override, RequestOptions, Timeout, Verify, DEFAULT_TIMEOUT,
};
pub use builder::ClientBuilder;
