use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::{ClientCert, RequestOptions, Verify};
use crate::middleware::Middleware;

/// Builder for blocking and async clients.
///
/// ```
/// use std::time::Duration;
/// use apiwrap::{ClientBuilder, middleware::LoggingMiddleware};
///
/// let builder = ClientBuilder::default()
///     .timeout(Some(Duration::from_secs(30)))
///     .verify(false)
///     .middleware(LoggingMiddleware);
/// ```
#[derive(Clone, Default)]
#[must_use]
pub struct ClientBuilder {
    pub(crate) options: RequestOptions,
    pub(crate) middleware: Vec<Arc<dyn Middleware>>,
}

impl ClientBuilder {
    /// Sets the default timeout. `None` waits indefinitely.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Sets the default TLS verification policy.
    pub fn verify(mut self, verify: impl Into<Verify>) -> Self {
        self.options.verify = verify.into();
        self
    }

    /// Sets the default client certificate.
    pub fn client_cert(mut self, cert: ClientCert) -> Self {
        self.options.cert = Some(cert);
        self
    }

    /// Appends a middleware. Middleware added first runs outermost.
    pub fn middleware(mut self, middleware: impl Middleware) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Appends an already shared middleware.
    pub fn middleware_arc(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("options", &self.options)
            .field(
                "middleware",
                &self.middleware.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
