use apiwrap_interface::{Headers, Request, Response};
use http::header::CONTENT_TYPE;
use http::HeaderMap;
use mime::Mime;

use crate::error::Result;

const DEFAULT_CHARSET: &str = "utf-8";

/// Picks the charset label advertised by `Content-Type`, if any, in lowercase.
pub(crate) fn charset_label(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<Mime>().ok())
        .and_then(|mime| mime.get_param("charset").map(|charset| charset.to_string()))
        .unwrap_or_else(|| DEFAULT_CHARSET.to_string())
}

/// Converts response headers, joining repeated fields with `", "`.
pub(crate) fn collect_headers(headers: &HeaderMap) -> Headers {
    let mut collected = Headers::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        match collected.get_mut(name.as_str()) {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(&value);
            }
            None => {
                collected.insert(name.as_str(), value);
            }
        }
    }
    collected
}

pub(crate) async fn collect_response(
    request: Request,
    response: reqwest::Response,
) -> Result<Response> {
    let status_code = response.status().as_u16();
    let url = response.url().to_string();
    let headers = collect_headers(response.headers());
    let encoding = charset_label(response.headers());
    let cookies = response
        .cookies()
        .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
        .collect();
    let content = response.bytes().await?.to_vec();

    Ok(Response {
        request,
        status_code,
        url,
        headers,
        cookies,
        content,
        encoding,
    })
}
