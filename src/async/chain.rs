use std::sync::Arc;

use apiwrap_interface::client::RequestOptions;
use apiwrap_interface::r#async::AnyAsyncDriver;
use futures::future::BoxFuture;
use tracing::debug;

use crate::middleware::Middleware;
use crate::{FetchOptions, Request, Response, Result};

/// The remaining layers of an async chain, ending at the driver.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    middleware: &'a [Arc<dyn Middleware>],
    driver: &'a dyn AnyAsyncDriver,
    defaults: &'a RequestOptions,
}

impl<'a> Next<'a> {
    pub(crate) fn new(
        middleware: &'a [Arc<dyn Middleware>],
        driver: &'a dyn AnyAsyncDriver,
        defaults: &'a RequestOptions,
    ) -> Self {
        Self {
            middleware,
            driver,
            defaults,
        }
    }

    /// Sends `request` through the remaining layers.
    pub fn run(
        self,
        request: &'a mut Request,
        options: &'a FetchOptions,
    ) -> BoxFuture<'a, Result<Response>> {
        match self.middleware.split_first() {
            Some((current, rest)) => current.call_async(request, options, Next {
                middleware: rest,
                ..self
            }),
            None => Box::pin(self.fetch(request, options)),
        }
    }

    async fn fetch(self, request: &'a Request, options: &'a FetchOptions) -> Result<Response> {
        let options = options.resolve(self.defaults);
        debug!(
            method = %request.method(),
            url = request.url(),
            timeout = ?options.timeout,
            "sending request"
        );
        let response = self.driver.fetch(request.as_wire(), &options).await?;
        debug!(status = response.status_code, url = %response.url, "received response");
        Ok(response)
    }
}

/// Runs one middleware layer: request hook, inner layers, then the response or
/// exception hook.
pub async fn call_next<M>(
    middleware: &M,
    request: &mut Request,
    options: &FetchOptions,
    next: Next<'_>,
) -> Result<Response>
where
    M: Middleware + ?Sized,
{
    middleware.process_request(request)?;
    let result = next.run(request, options).await;
    match result {
        Ok(response) => middleware.process_response(response),
        Err(error) => middleware.process_exception(request, error),
    }
}
