use std::fmt;

use crate::client::RequestOptions;
use crate::{Request, Response, Result};

/// Trait for blocking HTTP drivers.
///
/// The trait is object safe; clients hold drivers as `Arc<dyn BlockingDriver>`.
pub trait BlockingDriver: Send + Sync + 'static {
    /// Provides a textual description of this driver.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockingDriver")
    }

    /// Performs the exchange and returns the fully received response.
    ///
    /// The returned [`Response::request`] must be a copy of `request`.
    fn fetch(&self, request: &Request, options: &RequestOptions) -> Result<Response>;
}
