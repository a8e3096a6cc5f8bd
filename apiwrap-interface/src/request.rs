use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::body::Body;
use crate::headers::Headers;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `GET`
    Get,
    /// `PATCH`
    Patch,
    /// `POST`
    Post,
    /// `PUT`
    Put,
}

impl Method {
    /// All supported methods.
    pub const ALL: [Method; 6] = [
        Method::Delete,
        Method::Head,
        Method::Get,
        Method::Patch,
        Method::Post,
        Method::Put,
    ];

    /// Returns the canonical upper-case name of this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Get => "GET",
            Method::Patch => "PATCH",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a supported method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0:?} is not a valid Method")]
pub struct InvalidMethod(pub String);

impl FromStr for Method {
    type Err = InvalidMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InvalidMethod(s.to_owned()))
    }
}

/// A prepared request, as handed to a driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL without the query parameters below.
    pub url: String,
    /// Query parameters in insertion order. A key may repeat.
    pub query_params: Vec<(String, String)>,
    /// Request headers.
    pub headers: Headers,
    /// Cookies to send with the request.
    pub cookies: Vec<(String, String)>,
    /// Optional request body.
    pub body: Option<Body>,
}

impl Request {
    /// Creates a request without query, headers, cookies or body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query_params: vec![],
            headers: Headers::new(),
            cookies: vec![],
            body: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parse_ignores_case() {
        assert_eq!("get".parse::<Method>(), Ok(Method::Get));
        assert_eq!("PaTcH".parse::<Method>(), Ok(Method::Patch));
        assert_eq!("DELETE".parse::<Method>(), Ok(Method::Delete));
    }

    #[test]
    fn method_parse_rejects_unknown() {
        let err = "TRACE".parse::<Method>().unwrap_err();
        assert_eq!(err.to_string(), "\"TRACE\" is not a valid Method");
    }

    #[test]
    fn method_display_round_trips() {
        for method in Method::ALL {
            assert_eq!(method.to_string().parse::<Method>(), Ok(method));
        }
    }
}
