use std::fmt;
use std::future::Future;

use crate::client::RequestOptions;
use crate::{Request, Response, Result};

/// Trait for async HTTP drivers.
pub trait AsyncDriver: Send + Sync + 'static {
    /// Provides a textual description of this driver.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AsyncDriver")
    }

    /// Performs the exchange and resolves to the fully received response.
    ///
    /// The returned [`Response::request`] must be a copy of `request`.
    fn fetch(
        &self,
        request: &Request,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<Response>> + Send;
}
