use apiwrap_interface::client::RequestOptions;
use apiwrap_interface::{Body, Method, Request};
use http::header::{CONTENT_TYPE, COOKIE};
use http::{HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::error::{ReqwestDriverError, Result};

pub fn convert_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
        Method::Patch => reqwest::Method::PATCH,
    }
}

pub fn build_url(url: &str, query_params: &[(String, String)]) -> Result<Url> {
    let mut url = Url::parse(url).map_err(|_| ReqwestDriverError::InvalidUrl(url.to_string()))?;
    if !query_params.is_empty() {
        url.query_pairs_mut().extend_pairs(query_params);
    }
    Ok(url)
}

fn convert_header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| ReqwestDriverError::InvalidHeaderName(name.to_string()))
}

fn convert_header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| ReqwestDriverError::InvalidHeaderValue(name.into()))
}

/// Joins request cookies into a single `Cookie` header value.
fn cookie_header(cookies: &[(String, String)]) -> String {
    cookies
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

pub(crate) fn build_request(
    client: &Client,
    req: &Request,
    options: &RequestOptions,
) -> Result<RequestBuilder> {
    let url = build_url(&req.url, &req.query_params)?;
    let mut request_builder = client.request(convert_method(req.method), url);

    for (name, value) in req.headers.iter() {
        let value = convert_header_value(name, value)?;
        request_builder = request_builder.header(convert_header_name(name)?, value);
    }
    if !req.cookies.is_empty() {
        let value = convert_header_value("Cookie", &cookie_header(&req.cookies))?;
        request_builder = request_builder.header(COOKIE, value);
    }
    if let Some(timeout) = options.timeout {
        request_builder = request_builder.timeout(timeout);
    }

    match &req.body {
        None => {}
        Some(Body::Text {
            content,
            content_type,
        }) => {
            if let Some(content_type) = content_type {
                if !req.headers.contains_key("content-type") {
                    request_builder = request_builder
                        .header(CONTENT_TYPE, convert_header_value("Content-Type", content_type)?);
                }
            }
            request_builder = request_builder.body(content.clone());
        }
        Some(Body::Form { fields }) => {
            request_builder = request_builder.form(fields);
        }
        Some(Body::Json(value)) => {
            request_builder = request_builder.json(value);
        }
        #[cfg(feature = "multipart")]
        Some(Body::Multipart { parts }) => {
            let mut form = reqwest::multipart::Form::new();
            for part in parts {
                let mut reqwest_part = reqwest::multipart::Part::bytes(part.content.clone());
                if let Some(filename) = &part.filename {
                    reqwest_part = reqwest_part.file_name(filename.clone());
                }
                if let Some(content_type) = &part.content_type {
                    reqwest_part = reqwest_part.mime_str(content_type)?;
                }
                form = form.part(part.name.clone(), reqwest_part);
            }
            request_builder = request_builder.multipart(form);
        }
    }

    Ok(request_builder)
}
