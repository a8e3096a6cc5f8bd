use std::fmt;
use std::sync::Arc;

use apiwrap_interface::blocking::BlockingDriver;
use apiwrap_interface::client::RequestOptions;

use super::Next;
use crate::client::ClientBuilder;
use crate::fetch::Dispatch;
use crate::middleware::MiddlewareChain;
use crate::{FetchOptions, Request, Response, Result};

/// A blocking API client.
///
/// The current thread issuing a request is blocked until the whole chain, including the
/// driver, has finished.
///
/// # Thread safety
///
/// The client is thread-safe and cheap to clone. Its middleware list and default options
/// are fixed at build time, so concurrent calls never observe each other's changes.
#[derive(Clone)]
pub struct BlockingClient {
    driver: Arc<dyn BlockingDriver>,
    middleware: MiddlewareChain,
    options: RequestOptions,
}

impl ClientBuilder {
    /// Builds a blocking client on top of `driver`.
    pub fn build_blocking(self, driver: impl BlockingDriver) -> BlockingClient {
        BlockingClient {
            driver: Arc::new(driver),
            middleware: MiddlewareChain::new(self.middleware),
            options: self.options,
        }
    }
}

impl BlockingClient {
    /// Sends a request through the middleware chain and returns the raw response.
    pub fn send(&self, request: Request) -> Result<Response> {
        self.send_with(request, &FetchOptions::default())
    }

    /// Like [`send`](Self::send), with per-call option overrides.
    pub fn send_with(&self, mut request: Request, options: &FetchOptions) -> Result<Response> {
        Next::new(self.middleware.as_slice(), &*self.driver, &self.options)
            .run(&mut request, options)
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

impl Dispatch for BlockingClient {
    type Output<'a, T: 'a> = Result<T>
    where
        Self: 'a;

    fn dispatch<'a, T, F>(&'a self, request: Request, options: FetchOptions, then: F) -> Result<T>
    where
        T: Send + 'a,
        F: FnOnce(Response) -> Result<T> + Send + 'a,
    {
        then(self.send_with(request, &options)?)
    }

    fn ready<'a, T: Send + 'a>(&'a self, result: Result<T>) -> Result<T> {
        result
    }
}

impl fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BlockingClient(")?;
        self.driver.describe(f)?;
        write!(f, ", {:?})", self.middleware)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::middleware::{LoggingMiddleware, Middleware};
    use crate::test_util::{MockDriver, Tag};
    use crate::Error;

    const URL: &str = "https://example.org/items";

    #[test]
    fn middleware_runs_outer_to_inner_and_back() {
        let driver = MockDriver::new().route(URL, 200, "{}");
        let client = ClientBuilder::default()
            .middleware(Tag("1"))
            .middleware(Tag("2"))
            .build_blocking(driver.clone());
        let response = client.send(Request::get(URL).build().unwrap()).unwrap();

        assert_eq!(response.headers.get("x-response-id"), Some("21"));
        let calls = driver.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.headers.get("x-request-id"), Some("12"));
    }

    #[test]
    fn client_defaults_reach_the_driver() {
        let driver = MockDriver::new().route(URL, 200, "{}");
        let client = ClientBuilder::default()
            .timeout(Some(Duration::from_secs(300)))
            .verify(false)
            .build_blocking(driver.clone());
        client.send(Request::get(URL).build().unwrap()).unwrap();
        let (_, options) = &driver.calls()[0];
        assert_eq!(options.timeout, Some(Duration::from_secs(300)));
        assert_eq!(options.verify, crate::Verify::Disabled);
    }

    struct Translate;

    impl Middleware for Translate {
        fn process_exception(&self, request: &Request, error: Error) -> Result<Response> {
            Err(Error::custom(format!("{} failed: {error}", request.url())))
        }
    }

    #[test]
    fn exceptions_unwind_through_every_layer() {
        let client = ClientBuilder::default()
            .middleware(Translate)
            .middleware(LoggingMiddleware)
            .build_blocking(MockDriver::new());
        let err = client
            .send(Request::get("https://unreachable.invalid/").build().unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::Custom(_)));
        assert!(err
            .to_string()
            .starts_with("https://unreachable.invalid/ failed: Connection failed"));
    }

    #[test]
    fn driver_errors_are_not_swallowed() {
        let client = ClientBuilder::default()
            .middleware(LoggingMiddleware)
            .build_blocking(MockDriver::new());
        let err = client
            .send(Request::get("https://unreachable.invalid/").build().unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::ConnectionFailed(_)));
        assert!(err.is_driver_error());
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn logging_middleware_emits_events() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);
        let client = ClientBuilder::default()
            .middleware(LoggingMiddleware)
            .build_blocking(MockDriver::new().route(URL, 204, ""));

        let response = client.send(Request::get(URL).build().unwrap()).unwrap();
        assert_eq!(response.status_code, 204);
        let log = captured.text();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2, "{log}");
        assert!(lines[0].contains("INFO") && lines[0].contains("request method=GET"));
        assert!(lines[0].contains(URL));
        assert!(lines[1].contains("INFO") && lines[1].contains("response status=204"));
        assert!(!log.contains("request failed"));

        client
            .send(Request::post("https://unreachable.invalid/").build().unwrap())
            .unwrap_err();
        let log = captured.text();
        let failure = log
            .lines()
            .find(|line| line.contains("request failed"))
            .unwrap_or_else(|| panic!("no failure event in {log}"));
        assert!(failure.contains("ERROR"));
        assert!(failure.contains("method=POST"));
        assert!(failure.contains("https://unreachable.invalid/"));
        assert!(failure.contains("no route to https://unreachable.invalid/"));
    }
}
