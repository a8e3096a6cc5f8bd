use std::fmt;
use std::sync::Arc;

use apiwrap_interface::client::RequestOptions;
use apiwrap_interface::r#async::{AnyAsyncDriver, AsyncDriver};
use futures::future::BoxFuture;

use super::Next;
use crate::client::ClientBuilder;
use crate::fetch::Dispatch;
use crate::middleware::MiddlewareChain;
use crate::{FetchOptions, Request, Response, Result};

/// An async API client.
///
/// # Thread safety
///
/// The client is thread-safe and cheap to clone, and the futures it returns are `Send`.
/// Whether an async runtime must be running depends on the driver.
#[derive(Clone)]
pub struct AsyncClient {
    driver: Arc<dyn AnyAsyncDriver>,
    middleware: MiddlewareChain,
    options: RequestOptions,
}

impl ClientBuilder {
    /// Builds an async client on top of `driver`.
    pub fn build_async(self, driver: impl AsyncDriver) -> AsyncClient {
        AsyncClient {
            driver: Arc::new(driver),
            middleware: MiddlewareChain::new(self.middleware),
            options: self.options,
        }
    }
}

impl AsyncClient {
    /// Sends a request through the middleware chain and returns the raw response.
    pub async fn send(&self, request: Request) -> Result<Response> {
        self.send_with(request, &FetchOptions::default()).await
    }

    /// Like [`send`](Self::send), with per-call option overrides.
    pub async fn send_with(&self, mut request: Request, options: &FetchOptions) -> Result<Response> {
        Next::new(self.middleware.as_slice(), &*self.driver, &self.options)
            .run(&mut request, options)
            .await
    }

    /// The effective middleware chain.
    pub fn middleware(&self) -> &MiddlewareChain {
        &self.middleware
    }

    /// The default options applied when a call does not override them.
    pub fn options(&self) -> &RequestOptions {
        &self.options
    }
}

impl Dispatch for AsyncClient {
    type Output<'a, T: 'a> = BoxFuture<'a, Result<T>>
    where
        Self: 'a;

    fn dispatch<'a, T, F>(
        &'a self,
        request: Request,
        options: FetchOptions,
        then: F,
    ) -> BoxFuture<'a, Result<T>>
    where
        T: Send + 'a,
        F: FnOnce(Response) -> Result<T> + Send + 'a,
    {
        Box::pin(async move { then(self.send_with(request, &options).await?) })
    }

    fn ready<'a, T: Send + 'a>(&'a self, result: Result<T>) -> BoxFuture<'a, Result<T>> {
        Box::pin(async move { result })
    }
}

impl fmt::Debug for AsyncClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AsyncClient(")?;
        self.driver.describe(f)?;
        write!(f, ", {:?})", self.middleware)
    }
}
