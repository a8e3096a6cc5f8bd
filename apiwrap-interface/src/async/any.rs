//! Type-erased async driver trait.
//!
//! [`AsyncDriver`] returns `impl Future` and therefore cannot be used as a trait
//! object. [`AnyAsyncDriver`] boxes the future instead and is implemented for every
//! `AsyncDriver` automatically.

use std::fmt;

use futures_core::future::BoxFuture;

use super::driver::AsyncDriver;
use crate::client::RequestOptions;
use crate::{Request, Response, Result};

/// Object-safe form of [`AsyncDriver`].
pub trait AnyAsyncDriver: Send + Sync + 'static {
    /// Provides a textual description of this driver.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    /// Performs the exchange.
    fn fetch<'a>(
        &'a self,
        request: &'a Request,
        options: &'a RequestOptions,
    ) -> BoxFuture<'a, Result<Response>>;
}

impl<D> AnyAsyncDriver for D
where
    D: AsyncDriver,
{
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        AsyncDriver::describe(self, f)
    }

    fn fetch<'a>(
        &'a self,
        request: &'a Request,
        options: &'a RequestOptions,
    ) -> BoxFuture<'a, Result<Response>> {
        Box::pin(AsyncDriver::fetch(self, request, options))
    }
}
