//! Interface definitions for apiwrap drivers.
//!
//! This crate provides the wire-level types shared between the apiwrap facade and the
//! drivers that actually perform HTTP exchanges. A driver receives a fully prepared
//! [`Request`] together with resolved [`RequestOptions`](client::RequestOptions) and
//! produces a [`Response`]. Everything above that line (middleware, authentication,
//! JSON decoding) lives in the facade crate.
//!
//! ## Features
//!
//! - `async`: Enable the async driver interface
//! - `blocking`: Enable the blocking driver interface
//! - `multipart`: Enable multipart form bodies

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub mod r#async;
#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub mod blocking;
pub mod body;
pub mod client;
mod error;
mod headers;
mod request;
mod response;

pub use body::Body;
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
pub use body::Part;
pub use error::{BoxError, Error, Result};
pub use headers::Headers;
pub use request::{InvalidMethod, Method, Request};
pub use response::Response;
