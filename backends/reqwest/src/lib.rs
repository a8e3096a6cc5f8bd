//! [`reqwest`] driver for apiwrap.
//!
//! [`ReqwestDriver`] implements both the blocking and the async driver interface. It
//! keeps one `reqwest::Client` per distinct TLS configuration and applies the timeout
//! of each call individually.
//!
//! The async driver can be polled from any executor: outside a tokio runtime, requests
//! run on a small runtime managed by the driver. The blocking driver may be called from
//! inside a multi-threaded tokio runtime as well as from plain threads.

#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "async")]
mod r#async;
#[cfg(feature = "blocking")]
mod blocking;
mod client;
mod error;
mod request;
mod response;

pub use client::ReqwestDriver;
