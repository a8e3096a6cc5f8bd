use encoding_rs::{Encoding, UTF_8};

use crate::headers::Headers;
use crate::request::Request;

/// A fully received response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The request that produced this response.
    pub request: Request,
    /// HTTP status code.
    pub status_code: u16,
    /// Final URL after redirects.
    pub url: String,
    /// Response headers.
    pub headers: Headers,
    /// Cookies set by the response.
    pub cookies: Vec<(String, String)>,
    /// Raw body.
    pub content: Vec<u8>,
    /// Charset label used to decode [`text`](Self::text).
    pub encoding: String,
}

impl Response {
    /// Decodes the body using [`encoding`](Self::encoding), falling back to UTF-8 for
    /// unknown labels. Malformed sequences are replaced.
    pub fn text(&self) -> String {
        let encoding = Encoding::for_label(self.encoding.as_bytes()).unwrap_or(UTF_8);
        let (text, _, _) = encoding.decode(&self.content);
        text.into_owned()
    }

    /// Parses the body as JSON.
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.text())
    }

    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Returns the value of a response cookie.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| &**value)
    }
}
