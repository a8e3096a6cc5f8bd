//! Declarative API client wrappers.
//!
//! ## Overview
//!
//! `apiwrap` sits between your API wrapper code and an HTTP driver. You describe a call as
//! a [`Request`], send it through a client, and get back either the raw [`Response`] or a
//! value decoded from its JSON body. In between, every request passes through an ordered
//! chain of [`Middleware`](middleware::Middleware), ending in the built-in
//! [`Authentication`](middleware::Authentication) layer, which resolves the request's
//! [`Auth`](auth::Auth) into headers. That may involve extra requests first, for example
//! to obtain a token.
//!
//! The crate performs no network I/O itself. A driver implementing
//! [`BlockingDriver`](blocking::BlockingDriver) or [`AsyncDriver`](r#async::AsyncDriver)
//! from [`apiwrap-interface`] does that. `apiwrap-backend-reqwest` provides both.
//!
//! ## Usage
//!
//! ```no_run
//! use apiwrap::auth::{Auth, TokenAuth};
//! use apiwrap::r#async::AsyncDriver;
//! use apiwrap::{fetch, AsyncClient, ClientBuilder, Request};
//!
//! apiwrap::json_record! {
//!     pub struct Repo {
//!         pub name: String,
//!         pub stargazers_count: u32 = 0,
//!     }
//! }
//!
//! async fn repos(client: &AsyncClient, user: &str) -> apiwrap::Result<Vec<Repo>> {
//!     let request = Request::get(format!("https://api.github.com/users/{user}/repos"))
//!         .with_query("per_page", 100)
//!         .with_auth(Auth::custom(TokenAuth::new("ghp_...")))
//!         .build()?;
//!     fetch(client, request).model().await
//! }
//!
//! fn client(driver: impl AsyncDriver) -> AsyncClient {
//!     ClientBuilder::default().build_async(driver)
//! }
//! ```
//!
//! For blocking calls, build a [`BlockingClient`] instead and drop the `.await`s.
//!
//! ## Features
//!
//! - `async`: Enable [`AsyncClient`]. Enabled by default.
//! - `blocking`: Enable [`BlockingClient`]. Enabled by default.
//! - `multipart`: Enable multipart file bodies.
//!
//! [`apiwrap-interface`]: https://docs.rs/apiwrap-interface

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

mod error;
mod request;

#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub mod r#async;
pub mod auth;
#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub mod blocking;
pub mod client;
pub mod fetch;
pub mod json;
pub mod middleware;

#[cfg(test)]
mod test_util;

pub use apiwrap_interface::{Body, Headers, InvalidMethod, Method, Response};
#[cfg(feature = "multipart")]
#[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
pub use apiwrap_interface::Part;
#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub use blocking::BlockingClient;
#[doc(inline)]
pub use client::{ClientBuilder, ClientCert, FetchOptions, Override, Timeout, Verify};
pub use error::{Error, Result};
pub use fetch::{fetch, make_response, ApiWrapper, Endpoint};
pub use json::FromJson;
#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub use r#async::AsyncClient;
pub use request::{Request, RequestBuilder};

#[doc(hidden)]
pub mod __private {
    pub use serde_json::{json, Value};
}
