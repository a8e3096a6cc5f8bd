//! Authentication descriptors.
//!
//! An [`Auth`] attached to a [`Request`] is resolved by the
//! [`Authentication`](crate::middleware::Authentication) middleware right before the
//! request reaches the driver. A descriptor either produces the headers to add directly,
//! or an [`AuthFlow`] that first needs to exchange one or more requests of its own
//! (e.g. fetching a token) before it can produce them.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::{Headers, Request, Response, Result};

/// The outcome of invoking an authentication descriptor.
pub enum Authorization {
    /// Headers to merge into the request right away.
    Headers(Headers),
    /// A multi-step flow that must be driven to completion first.
    Flow(Box<dyn AuthFlow>),
}

impl fmt::Debug for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authorization::Headers(headers) => {
                f.debug_tuple("Headers").field(&headers.len()).finish()
            }
            Authorization::Flow(_) => f.write_str("Flow"),
        }
    }
}

/// A single step of an [`AuthFlow`].
#[derive(Debug)]
pub enum AuthStep {
    /// Send this request and feed its response into the next step.
    Request(Request),
    /// The flow is finished; merge these headers into the real request.
    Done(Headers),
}

/// A resumable, possibly multi-round authentication negotiation.
///
/// The middleware calls [`next_step`](Self::next_step) with `None` first. Whenever the
/// flow answers with [`AuthStep::Request`], that request is sent through the remaining
/// middleware and the driver, and its response is passed to the following call. The
/// loop ends with [`AuthStep::Done`]. Errors returned by the flow propagate unchanged.
pub trait AuthFlow: Send {
    /// Advances the flow with the response to the previously requested exchange.
    fn next_step(&mut self, response: Option<Response>) -> Result<AuthStep>;
}

/// A zero-argument authentication descriptor.
pub trait Authenticate: Send + Sync + 'static {
    /// Produces headers or a flow for one outgoing request.
    fn authenticate(&self) -> Result<Authorization>;

    /// Describes this descriptor without revealing secrets.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(std::any::type_name::<Self>())
    }
}

/// Authentication attached to a request.
#[derive(Clone)]
pub enum Auth {
    /// A username/password pair, sent as HTTP Basic credentials.
    Credentials {
        /// User name.
        username: String,
        /// Password.
        password: String,
    },
    /// Any other descriptor.
    Custom(Arc<dyn Authenticate>),
}

impl Auth {
    /// HTTP Basic credentials.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Auth::Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Wraps a custom descriptor.
    pub fn custom(auth: impl Authenticate) -> Self {
        Auth::Custom(Arc::new(auth))
    }

    /// Uses a closure returning the headers to add.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> Result<Headers> + Send + Sync + 'static,
    {
        Auth::custom(FnAuth(f))
    }

    /// Invokes the descriptor.
    pub fn authenticate(&self) -> Result<Authorization> {
        match self {
            Auth::Credentials { username, password } => {
                BasicAuth::new(username.as_str(), password.as_str()).authenticate()
            }
            Auth::Custom(auth) => auth.authenticate(),
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Credentials { username, .. } => write!(f, "BasicAuth({username:?})"),
            Auth::Custom(auth) => auth.describe(f),
        }
    }
}

struct FnAuth<F>(F);

impl<F> Authenticate for FnAuth<F>
where
    F: Fn() -> Result<Headers> + Send + Sync + 'static,
{
    fn authenticate(&self) -> Result<Authorization> {
        (self.0)().map(Authorization::Headers)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnAuth")
    }
}

/// HTTP Basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    /// Creates Basic credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Authenticate for BasicAuth {
    fn authenticate(&self) -> Result<Authorization> {
        let credentials = STANDARD.encode(format!("{}:{}", self.username, self.password));
        Ok(Authorization::Headers(Headers::from_iter([(
            "Authorization",
            format!("Basic {credentials}"),
        )])))
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BasicAuth({:?})", self.username)
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe(f)
    }
}

/// Token authentication, `Authorization: <kind> <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenAuth {
    token: String,
    kind: String,
}

impl TokenAuth {
    /// A `Bearer` token.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_kind(token, "Bearer")
    }

    /// A token with a custom scheme, e.g. `JWT`.
    pub fn with_kind(token: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            kind: kind.into(),
        }
    }
}

impl Authenticate for TokenAuth {
    fn authenticate(&self) -> Result<Authorization> {
        Ok(Authorization::Headers(Headers::from_iter([(
            "Authorization",
            format!("{} {}", self.kind, self.token),
        )])))
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenAuth(\"{} ...\")", self.kind)
    }
}

impl fmt::Debug for TokenAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe(f)
    }
}

/// API key sent in a custom header.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeyAuth {
    key: String,
    header: String,
}

impl ApiKeyAuth {
    /// Sends `key` in the `header` header.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
        }
    }
}

impl Authenticate for ApiKeyAuth {
    fn authenticate(&self) -> Result<Authorization> {
        Ok(Authorization::Headers(Headers::from_iter([(
            self.header.as_str(),
            self.key.as_str(),
        )])))
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKeyAuth(\"{} ...\")", self.header)
    }
}

impl fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe(f)
    }
}
