#[cfg(feature = "async")]
use futures::future::BoxFuture;
use tracing::debug;

use super::Middleware;
use crate::auth::{AuthFlow, AuthStep, Authorization};
use crate::{FetchOptions, Headers, Request, Response, Result};

/// Resolves the [`Auth`](crate::auth::Auth) attached to a request into headers.
///
/// Always part of every chain, innermost. Requests issued by an
/// [`AuthFlow`] are sent through the same inner layers as the request being
/// authenticated; their own `auth` is not resolved.
#[derive(Debug, Default, Clone, Copy)]
pub struct Authentication;

/// A flow that is already finished.
struct Ready(Option<Headers>);

impl AuthFlow for Ready {
    fn next_step(&mut self, _response: Option<Response>) -> Result<AuthStep> {
        Ok(AuthStep::Done(self.0.take().unwrap_or_default()))
    }
}

impl Authentication {
    fn begin(request: &Request) -> Result<Option<Box<dyn AuthFlow>>> {
        let Some(auth) = request.auth() else {
            return Ok(None);
        };
        Ok(Some(match auth.authenticate()? {
            Authorization::Headers(headers) => Box::new(Ready(Some(headers))),
            Authorization::Flow(flow) => flow,
        }))
    }

    fn apply(request: &mut Request, headers: Headers) {
        request.headers_mut().extend(headers);
    }
}

impl Middleware for Authentication {
    #[cfg(feature = "blocking")]
    fn call(
        &self,
        request: &mut Request,
        options: &FetchOptions,
        next: crate::blocking::Next<'_>,
    ) -> Result<Response> {
        if let Some(mut flow) = Self::begin(request)? {
            let mut response = None;
            let headers = loop {
                match flow.next_step(response.take())? {
                    AuthStep::Request(mut auth_request) => {
                        debug!(url = auth_request.url(), "sending authentication request");
                        response = Some(crate::blocking::call_next(
                            self,
                            &mut auth_request,
                            options,
                            next,
                        )?);
                    }
                    AuthStep::Done(headers) => break headers,
                }
            };
            Self::apply(request, headers);
        }
        crate::blocking::call_next(self, request, options, next)
    }

    #[cfg(feature = "async")]
    fn call_async<'a>(
        &'a self,
        request: &'a mut Request,
        options: &'a FetchOptions,
        next: crate::r#async::Next<'a>,
    ) -> BoxFuture<'a, Result<Response>> {
        Box::pin(async move {
            if let Some(mut flow) = Self::begin(request)? {
                let mut response = None;
                let headers = loop {
                    match flow.next_step(response.take())? {
                        AuthStep::Request(mut auth_request) => {
                            debug!(url = auth_request.url(), "sending authentication request");
                            response = Some(
                                crate::r#async::call_next(self, &mut auth_request, options, next)
                                    .await?,
                            );
                        }
                        AuthStep::Done(headers) => break headers,
                    }
                };
                Self::apply(request, headers);
            }
            crate::r#async::call_next(self, request, options, next).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Auth, Authenticate};
    use crate::test_util::{MockDriver, Tag};
    use crate::{ClientBuilder, Error};

    const TOKEN_URL: &str = "https://example.org/token";
    const URL: &str = "https://example.org/me";

    struct TokenExchange;

    struct TokenFlow {
        requested: bool,
    }

    impl AuthFlow for TokenFlow {
        fn next_step(&mut self, response: Option<Response>) -> Result<AuthStep> {
            match (self.requested, response) {
                (false, None) => {
                    self.requested = true;
                    Ok(AuthStep::Request(Request::post(TOKEN_URL).build()?))
                }
                (true, Some(response)) => {
                    let token = response.json()?["token"]
                        .as_str()
                        .ok_or_else(|| Error::custom("no token"))?
                        .to_owned();
                    Ok(AuthStep::Done(Headers::from_iter([(
                        "Authorization",
                        format!("Bearer {token}"),
                    )])))
                }
                _ => Err(Error::custom("flow resumed out of order")),
            }
        }
    }

    impl Authenticate for TokenExchange {
        fn authenticate(&self) -> Result<Authorization> {
            Ok(Authorization::Flow(Box::new(TokenFlow { requested: false })))
        }
    }

    fn request() -> Request {
        Request::get(URL)
            .with_header("Accept", "application/json")
            .with_auth(Auth::custom(TokenExchange))
            .build()
            .unwrap()
    }

    fn assert_token_exchange(driver: &MockDriver) {
        let calls = driver.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0.url, TOKEN_URL);
        assert_eq!(calls[0].0.headers.get("x-request-id"), None);
        assert_eq!(calls[1].0.url, URL);
        assert_eq!(calls[1].0.headers.get("authorization"), Some("Bearer abc"));
        assert_eq!(calls[1].0.headers.get("accept"), Some("application/json"));
        assert_eq!(calls[1].0.headers.get("x-request-id"), Some("1"));
    }

    fn driver() -> MockDriver {
        MockDriver::new()
            .route(TOKEN_URL, 200, r#"{"token": "abc"}"#)
            .route(URL, 200, r#"{"id": 1}"#)
    }

    #[cfg(feature = "blocking")]
    #[test]
    fn flow_runs_before_the_real_request() {
        let driver = driver();
        let client = ClientBuilder::default()
            .middleware(Tag("1"))
            .build_blocking(driver.clone());
        let response = client.send(request()).unwrap();
        assert_eq!(response.url, URL);
        assert_token_exchange(&driver);
    }

    #[cfg(feature = "async")]
    #[test]
    fn flow_runs_before_the_real_request_async() {
        let driver = driver();
        let client = ClientBuilder::default()
            .middleware(Tag("1"))
            .build_async(driver.clone());
        let response = futures::executor::block_on(client.send(request())).unwrap();
        assert_eq!(response.url, URL);
        assert_token_exchange(&driver);
    }

    #[cfg(feature = "blocking")]
    #[test]
    fn registering_twice_runs_the_flow_once() {
        let driver = driver();
        let client = ClientBuilder::default()
            .middleware(Authentication)
            .middleware(Tag("1"))
            .middleware(Authentication)
            .build_blocking(driver.clone());
        client.send(request()).unwrap();
        assert_token_exchange(&driver);
    }

    #[cfg(feature = "blocking")]
    #[test]
    fn failed_sub_request_aborts() {
        let driver = MockDriver::new().route(URL, 200, "{}");
        let client = ClientBuilder::default().build_blocking(driver.clone());
        let err = client.send(request()).unwrap_err();
        assert!(matches!(err, Error::ConnectionFailed(_)));
        assert_eq!(driver.calls().len(), 1);
    }

    #[cfg(feature = "blocking")]
    #[test]
    fn credentials_become_basic_auth() {
        let driver = MockDriver::new().route(URL, 200, "{}");
        let client = ClientBuilder::default().build_blocking(driver.clone());
        let request = Request::get(URL)
            .with_header("X-Trace", "t")
            .with_basic_auth("username", "password")
            .build()
            .unwrap();
        client.send(request).unwrap();
        let (sent, _) = &driver.calls()[0];
        assert_eq!(
            sent.headers.get("Authorization"),
            Some("Basic dXNlcm5hbWU6cGFzc3dvcmQ=")
        );
        assert_eq!(sent.headers.get("x-trace"), Some("t"));
    }

    #[cfg(feature = "blocking")]
    #[test]
    fn no_auth_leaves_headers_alone() {
        let driver = MockDriver::new().route(URL, 200, "{}");
        let client = ClientBuilder::default().build_blocking(driver.clone());
        client.send(Request::get(URL).build().unwrap()).unwrap();
        assert!(driver.calls()[0].0.headers.is_empty());
    }
}
