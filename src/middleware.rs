//! The middleware pipeline.
//!
//! Every client owns an immutable, ordered list of [`Middleware`] objects. For each call
//! the list is walked from the outermost entry inwards, ending at the driver:
//!
//! ```text
//! M1 -> M2 -> ... -> Mn -> Authentication -> driver
//! ```
//!
//! Each layer runs [`process_request`](Middleware::process_request) before handing the
//! request on, then [`process_response`](Middleware::process_response) on the way back,
//! or [`process_exception`](Middleware::process_exception) if anything further in
//! failed. The same objects serve blocking and async clients; only the step that calls
//! the next layer differs.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "async")]
use futures::future::BoxFuture;

use crate::{Error, FetchOptions, Request, Response, Result};

mod authentication;
mod logging;

pub use authentication::Authentication;
pub use logging::LoggingMiddleware;

/// A request/response interceptor.
///
/// All hooks default to passing their input through. Middleware objects are shared by
/// every call a client makes, so any state they keep must be synchronized.
pub trait Middleware: Send + Sync + 'static {
    /// Inspects or rewrites the request before it is passed inwards.
    fn process_request(&self, request: &mut Request) -> Result<()> {
        let _ = request;
        Ok(())
    }

    /// Inspects or rewrites the response on its way out.
    fn process_response(&self, response: Response) -> Result<Response> {
        Ok(response)
    }

    /// Called with the error raised by an inner layer or the driver.
    ///
    /// The default re-raises the error unchanged. Overrides may translate or log it.
    fn process_exception(&self, request: &Request, error: Error) -> Result<Response> {
        let _ = request;
        Err(error)
    }

    /// Name used in logs and debug output.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Runs this layer on a blocking chain.
    ///
    /// Override only to change how the inner layers are invoked, as
    /// [`Authentication`] does to send extra requests.
    #[cfg(feature = "blocking")]
    #[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
    fn call(
        &self,
        request: &mut Request,
        options: &FetchOptions,
        next: crate::blocking::Next<'_>,
    ) -> Result<Response> {
        crate::blocking::call_next(self, request, options, next)
    }

    /// Runs this layer on an async chain.
    #[cfg(feature = "async")]
    #[cfg_attr(docsrs, doc(cfg(feature = "async")))]
    fn call_async<'a>(
        &'a self,
        request: &'a mut Request,
        options: &'a FetchOptions,
        next: crate::r#async::Next<'a>,
    ) -> BoxFuture<'a, Result<Response>> {
        Box::pin(crate::r#async::call_next(self, request, options, next))
    }

    #[doc(hidden)]
    fn kind(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

/// The effective, ordered middleware list of a client, outermost first.
#[derive(Clone)]
pub struct MiddlewareChain {
    items: Arc<[Arc<dyn Middleware>]>,
}

impl MiddlewareChain {
    /// Middleware every chain contains.
    pub fn defaults() -> Vec<Arc<dyn Middleware>> {
        vec![Arc::new(Authentication)]
    }

    /// Merges `middleware` with [`defaults`](Self::defaults).
    pub fn new(middleware: impl IntoIterator<Item = Arc<dyn Middleware>>) -> Self {
        Self::with_defaults(middleware, Self::defaults())
    }

    /// Merges `middleware` with an explicit default list.
    ///
    /// User middleware keeps its relative order and defaults always end up innermost.
    /// A default the user registered explicitly is not duplicated: the user's first
    /// instance is moved to the default's position and any further ones are dropped.
    pub fn with_defaults(
        middleware: impl IntoIterator<Item = Arc<dyn Middleware>>,
        defaults: impl IntoIterator<Item = Arc<dyn Middleware>>,
    ) -> Self {
        let mut items: Vec<Arc<dyn Middleware>> = middleware.into_iter().collect();
        let mut inner = vec![];
        for default in defaults {
            let kind = default.kind();
            let chosen = items
                .iter()
                .find(|m| m.kind() == kind)
                .cloned()
                .unwrap_or(default);
            items.retain(|m| m.kind() != kind);
            inner.push(chosen);
        }
        items.extend(inner);
        Self {
            items: items.into(),
        }
    }

    /// The middleware, outermost first.
    pub fn as_slice(&self) -> &[Arc<dyn Middleware>] {
        &self.items
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the chain has no layers.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for MiddlewareChain {
    fn default() -> Self {
        Self::new([])
    }
}

impl fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.items.iter().map(|m| m.name()))
            .finish()
    }
}
