use hyper::header::AsHeaderName;
use hyper::{body, Request};

pub trait RequestExt {
    /// Whether the request was sent by a blocking client (see `MarkBlocking`).
    fn is_blocking(&self) -> bool;

    /// Returns a header as an owned string, if present and valid UTF-8.
    fn header_str(&self, name: impl AsHeaderName) -> Option<String>;
}

impl RequestExt for Request<body::Incoming> {
    fn is_blocking(&self) -> bool {
        self.headers().get("blocking").map(|v| v.as_bytes()) == Some(b"1")
    }

    fn header_str(&self, name: impl AsHeaderName) -> Option<String> {
        self.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    }
}
