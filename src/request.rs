use std::fmt;

#[cfg(feature = "multipart")]
use apiwrap_interface::Part;
use apiwrap_interface::{Body, Headers, Method, Request as RequestImpl};
use serde::Serialize;

use crate::auth::Auth;
use crate::error::{Error, Result};

/// An HTTP request together with the authentication to apply to it.
///
/// Requests are created through [`RequestBuilder`], usually via one of the method
/// shortcuts such as [`Request::get`]. Middleware receives them mutably and may change
/// any part before the driver sees the wire form.
#[derive(Clone)]
pub struct Request {
    pub(crate) inner: RequestImpl,
    auth: Option<Auth>,
}

impl Request {
    /// Starts building a request with an arbitrary method.
    pub fn builder(method: Method, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// Starts building a `GET` request.
    pub fn get(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Get, url)
    }

    /// Starts building a `POST` request.
    pub fn post(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Post, url)
    }

    /// Starts building a `PUT` request.
    pub fn put(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Put, url)
    }

    /// Starts building a `PATCH` request.
    pub fn patch(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Patch, url)
    }

    /// Starts building a `DELETE` request.
    pub fn delete(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Delete, url)
    }

    /// Starts building a `HEAD` request.
    pub fn head(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Head, url)
    }

    /// HTTP method.
    pub fn method(&self) -> Method {
        self.inner.method
    }

    /// Target URL.
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Mutable access to the target URL.
    pub fn url_mut(&mut self) -> &mut String {
        &mut self.inner.url
    }

    /// Query parameters in insertion order.
    pub fn query_params(&self) -> &[(String, String)] {
        &self.inner.query_params
    }

    /// Mutable access to the query parameters.
    pub fn query_params_mut(&mut self) -> &mut Vec<(String, String)> {
        &mut self.inner.query_params
    }

    /// Request headers.
    pub fn headers(&self) -> &Headers {
        &self.inner.headers
    }

    /// Mutable access to the request headers.
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.inner.headers
    }

    /// Request cookies.
    pub fn cookies(&self) -> &[(String, String)] {
        &self.inner.cookies
    }

    /// Mutable access to the request cookies.
    pub fn cookies_mut(&mut self) -> &mut Vec<(String, String)> {
        &mut self.inner.cookies
    }

    /// Request body, if any.
    pub fn body(&self) -> Option<&Body> {
        self.inner.body.as_ref()
    }

    /// Authentication attached to this request.
    pub fn auth(&self) -> Option<&Auth> {
        self.auth.as_ref()
    }

    /// Replaces the authentication attached to this request.
    pub fn set_auth(&mut self, auth: Option<Auth>) {
        self.auth = auth;
    }

    /// The wire form handed to drivers.
    pub fn as_wire(&self) -> &RequestImpl {
        &self.inner
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.inner.method)
            .field("url", &self.inner.url)
            .field("query_params", &self.inner.query_params)
            .field("headers", &self.inner.headers)
            .field("cookies", &self.inner.cookies)
            .field("body", &self.inner.body)
            .field("auth", &self.auth)
            .finish()
    }
}

/// Builder for [`Request`].
///
/// Form or text data, multipart files and JSON are tracked separately and checked in
/// [`build`](Self::build): giving more than one of them is an error.
#[derive(Debug, Clone)]
#[must_use]
pub struct RequestBuilder {
    inner: RequestImpl,
    auth: Option<Auth>,
    data: Option<Body>,
    #[cfg(feature = "multipart")]
    files: Option<Vec<Part>>,
    json: Option<std::result::Result<serde_json::Value, String>>,
}

impl RequestBuilder {
    /// Creates a builder for the given method and URL.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            inner: RequestImpl::new(method, url),
            auth: None,
            data: None,
            #[cfg(feature = "multipart")]
            files: None,
            json: None,
        }
    }

    /// Appends a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.inner.query_params.push((key.into(), value.to_string()));
        self
    }

    /// Appends a query parameter if `value` is `Some`. `None` omits the key entirely.
    pub fn with_optional_query(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.with_query(key, value),
            None => self,
        }
    }

    /// Appends one query parameter per value, all under the same key.
    pub fn with_query_values<V: ToString>(
        mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let key = key.into();
        for value in values {
            self.inner.query_params.push((key.clone(), value.to_string()));
        }
        self
    }

    /// Sets a header, replacing any header with the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.headers.insert(name, value);
        self
    }

    /// Adds a cookie.
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.cookies.push((name.into(), value.into()));
        self
    }

    /// Sends URL-encoded form fields as the body.
    pub fn with_form<K: Into<String>, V: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        let fields = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.data = Some(Body::Form { fields });
        self
    }

    /// Sends raw text as the body.
    pub fn with_text(mut self, content: impl Into<String>, content_type: Option<&str>) -> Self {
        self.data = Some(Body::Text {
            content: content.into(),
            content_type: content_type.map(Into::into),
        });
        self
    }

    /// Sends multipart form data as the body.
    #[cfg(feature = "multipart")]
    #[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
    pub fn with_files(mut self, parts: impl IntoIterator<Item = Part>) -> Self {
        self.files = Some(parts.into_iter().collect());
        self
    }

    /// Serializes `value` and sends it as a JSON body.
    pub fn with_json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.json = Some(serde_json::to_value(value).map_err(|e| e.to_string()));
        self
    }

    /// Attaches authentication.
    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Attaches HTTP Basic credentials.
    pub fn with_basic_auth(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.with_auth(Auth::basic(username, password))
    }

    /// Finishes the request.
    pub fn build(self) -> Result<Request> {
        #[allow(unused_mut)]
        let mut body_kinds = self.data.is_some() as u8 + self.json.is_some() as u8;
        #[cfg(feature = "multipart")]
        {
            body_kinds += self.files.is_some() as u8;
        }
        if body_kinds > 1 {
            return Err(Error::InvalidRequest(
                "`data`, `files` and `json` parameters are mutually exclusive".into(),
            ));
        }

        let mut inner = self.inner;
        inner.body = self.data;
        #[cfg(feature = "multipart")]
        if let Some(parts) = self.files {
            inner.body = Some(Body::Multipart { parts });
        }
        if let Some(json) = self.json {
            let value = json.map_err(|e| Error::InvalidRequest(format!("invalid JSON body: {e}")))?;
            inner.body = Some(Body::Json(value));
        }
        Ok(Request {
            inner,
            auth: self.auth,
        })
    }
}

impl TryFrom<RequestBuilder> for Request {
    type Error = Error;

    fn try_from(builder: RequestBuilder) -> Result<Self> {
        builder.build()
    }
}
