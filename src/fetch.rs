//! One-call dispatch for blocking and async clients.
//!
//! [`fetch`] sends a request through a client and optionally decodes the JSON body into
//! a typed model. It works the same for [`BlockingClient`](crate::BlockingClient), where
//! the result is returned directly, and [`AsyncClient`](crate::AsyncClient), where it is
//! a `Send` future.
//!
//! ```no_run
//! use apiwrap::blocking::BlockingDriver;
//! use apiwrap::{fetch, ClientBuilder, Request};
//!
//! apiwrap::json_record! {
//!     pub struct User {
//!         pub id: u64,
//!         pub name: String,
//!     }
//! }
//!
//! fn load_user(driver: impl BlockingDriver) -> apiwrap::Result<User> {
//!     let client = ClientBuilder::default().build_blocking(driver);
//!     let request = Request::get("https://example.org/users/1").build()?;
//!     fetch(&client, request).source("data.user").model()
//! }
//! ```
//!
//! Calls a wrapper makes repeatedly can be declared once as an [`Endpoint`]: a request
//! factory together with the model and source path its response decodes into.
//!
//! ```no_run
//! use apiwrap::fetch::{ApiWrapper, Dispatch, Endpoint};
//! use apiwrap::{Request, Result};
//!
//! apiwrap::json_record! {
//!     pub struct User {
//!         pub id: u64,
//!         pub name: String,
//!     }
//! }
//!
//! pub struct Users<C> {
//!     client: C,
//!     host: String,
//! }
//!
//! impl<C: Dispatch> ApiWrapper for Users<C> {
//!     type Client = C;
//!
//!     fn client(&self) -> &C {
//!         &self.client
//!     }
//! }
//!
//! impl<C: Dispatch> Users<C> {
//!     const GET: Endpoint<Self, u64, User> = Endpoint::at("data.user", Self::get_request);
//!
//!     fn get_request(&self, id: u64) -> Result<Request> {
//!         Request::get(format!("{}/users/{id}", self.host)).build()
//!     }
//!
//!     pub fn get(&self, id: u64) -> C::Output<'_, User> {
//!         Self::GET.call(self, id)
//!     }
//! }
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use serde_json::Value;

use crate::json::{get_by_path, FromJson};
use crate::{ClientCert, FetchOptions, Override, Request, Response, Result, Verify};

/// A client that can run a request and post-process its response.
///
/// Implemented by [`BlockingClient`](crate::BlockingClient), whose output is `Result<T>`,
/// and [`AsyncClient`](crate::AsyncClient), whose output is a boxed future of it.
pub trait Dispatch {
    /// The result of a dispatch.
    type Output<'a, T: 'a>
    where
        Self: 'a;

    /// Sends `request` through the middleware chain and hands the response to `then`.
    fn dispatch<'a, T, F>(&'a self, request: Request, options: FetchOptions, then: F) -> Self::Output<'a, T>
    where
        T: Send + 'a,
        F: FnOnce(Response) -> Result<T> + Send + 'a;

    /// Wraps an already known result in this client's output.
    fn ready<'a, T: Send + 'a>(&'a self, result: Result<T>) -> Self::Output<'a, T>;
}

/// Starts a dispatch of `request` through `client`.
pub fn fetch<C: Dispatch + ?Sized>(client: &C, request: Request) -> Fetch<'_, C> {
    Fetch {
        client,
        request,
        options: FetchOptions::default(),
        source: None,
    }
}

/// Sends `request` with the given overrides and returns the raw response.
pub fn make_response<'a, C: Dispatch + ?Sized>(
    client: &'a C,
    request: Request,
    options: FetchOptions,
) -> C::Output<'a, Response> {
    client.dispatch(request, options, Ok)
}

/// A pending dispatch, created by [`fetch`].
#[must_use]
pub struct Fetch<'a, C: ?Sized> {
    client: &'a C,
    request: Request,
    options: FetchOptions,
    source: Option<String>,
}

impl<'a, C: Dispatch + ?Sized> Fetch<'a, C> {
    /// Overrides the client's timeout for this call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Override::Value(Some(timeout));
        self
    }

    /// Disables the timeout for this call.
    pub fn no_timeout(mut self) -> Self {
        self.options.timeout = Override::Value(None);
        self
    }

    /// Overrides the client's TLS verification for this call.
    pub fn verify(mut self, verify: impl Into<Verify>) -> Self {
        self.options.verify = Override::Value(verify.into());
        self
    }

    /// Overrides the client certificate for this call.
    pub fn cert(mut self, cert: Option<ClientCert>) -> Self {
        self.options.cert = Override::Value(cert);
        self
    }

    /// Replaces all overrides at once.
    pub fn options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    /// Dot-separated path of the JSON value to decode, e.g. `"data.items.0"`.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sends the request and returns the raw response.
    pub fn send(self) -> C::Output<'a, Response> {
        make_response(self.client, self.request, self.options)
    }

    /// Sends the request and decodes the JSON at [`source`](Self::source) as `T`.
    pub fn model<T: FromJson + Send + 'a>(self) -> C::Output<'a, T> {
        self.parse_with(|value| Ok(T::from_json(value)?))
    }

    /// Sends the request and passes the JSON at [`source`](Self::source) to `parse`.
    pub fn parse_with<T, F>(self, parse: F) -> C::Output<'a, T>
    where
        T: Send + 'a,
        F: FnOnce(Value) -> Result<T> + Send + 'a,
    {
        let source = self.source;
        self.client
            .dispatch(self.request, self.options, move |response| {
                parse(extract(&response, source.as_deref())?)
            })
    }
}

/// A type that owns a client and exposes API calls through it.
pub trait ApiWrapper {
    /// The client calls are dispatched through.
    type Client: Dispatch + ?Sized;

    /// The wrapped client.
    fn client(&self) -> &Self::Client;
}

#[cfg(feature = "blocking")]
impl ApiWrapper for crate::BlockingClient {
    type Client = Self;

    fn client(&self) -> &Self {
        self
    }
}

#[cfg(feature = "async")]
impl ApiWrapper for crate::AsyncClient {
    type Client = Self;

    fn client(&self) -> &Self {
        self
    }
}

/// A declared API call of the wrapper `W`.
///
/// The request factory receives the wrapper and the call arguments `A`. The JSON of the
/// response, taken at the optional source path, decodes into `T`. Endpoints are plain
/// values and are usually kept in associated constants.
pub struct Endpoint<W: ?Sized, A, T> {
    request: fn(&W, A) -> Result<Request>,
    source: Option<&'static str>,
    model: PhantomData<fn() -> T>,
}

impl<W: ?Sized, A, T> Endpoint<W, A, T> {
    /// An endpoint decoding the whole response body.
    pub const fn new(request: fn(&W, A) -> Result<Request>) -> Self {
        Self {
            request,
            source: None,
            model: PhantomData,
        }
    }

    /// An endpoint decoding the JSON found at `source`.
    pub const fn at(source: &'static str, request: fn(&W, A) -> Result<Request>) -> Self {
        Self {
            request,
            source: Some(source),
            model: PhantomData,
        }
    }

    /// The source path, if any.
    pub fn source(&self) -> Option<&'static str> {
        self.source
    }
}

impl<W: ApiWrapper + ?Sized, A, T: FromJson + Send> Endpoint<W, A, T> {
    /// Builds the request for `args` and fetches it through the wrapper's client.
    ///
    /// A failing request factory is reported through the client's output without
    /// anything being sent.
    pub fn call<'a>(&self, wrapper: &'a W, args: A) -> <W::Client as Dispatch>::Output<'a, T>
    where
        W::Client: 'a,
        T: 'a,
    {
        let client = wrapper.client();
        let request = match (self.request)(wrapper, args) {
            Ok(request) => request,
            Err(err) => return client.ready(Err(err)),
        };
        let pending = fetch(client, request);
        match self.source {
            Some(source) => pending.source(source).model(),
            None => pending.model(),
        }
    }
}

impl<W: ?Sized, A, T> Clone for Endpoint<W, A, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W: ?Sized, A, T> Copy for Endpoint<W, A, T> {}

impl<W: ?Sized, A, T> fmt::Debug for Endpoint<W, A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("model", &std::any::type_name::<T>())
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

fn extract(response: &Response, source: Option<&str>) -> Result<Value> {
    Ok(get_by_path(response.json()?, source)?)
}
