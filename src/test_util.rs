use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use apiwrap_interface::client::RequestOptions;
use apiwrap_interface::{Error as DriverError, Headers, Request as RequestImpl, Response};

/// A canned driver recording every exchange it performs.
#[derive(Clone, Default)]
pub(crate) struct MockDriver {
    routes: Arc<Mutex<HashMap<String, (u16, String)>>>,
    calls: Arc<Mutex<Vec<(RequestImpl, RequestOptions)>>>,
}

impl MockDriver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn route(self, url: &str, status: u16, body: &str) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_owned(), (status, body.to_owned()));
        self
    }

    pub(crate) fn calls(&self) -> Vec<(RequestImpl, RequestOptions)> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, request: &RequestImpl, options: &RequestOptions) -> Result<Response, DriverError> {
        self.calls
            .lock()
            .unwrap()
            .push((request.clone(), options.clone()));
        let Some((status_code, body)) = self.routes.lock().unwrap().get(&request.url).cloned() else {
            return Err(DriverError::ConnectionFailed(
                format!("no route to {}", request.url).into(),
            ));
        };
        Ok(Response {
            request: request.clone(),
            status_code,
            url: request.url.clone(),
            headers: Headers::from_iter([("Content-Type", "application/json")]),
            cookies: vec![],
            content: body.into_bytes(),
            encoding: "utf-8".into(),
        })
    }
}

#[cfg(feature = "blocking")]
impl apiwrap_interface::blocking::BlockingDriver for MockDriver {
    fn fetch(&self, request: &RequestImpl, options: &RequestOptions) -> Result<Response, DriverError> {
        self.respond(request, options)
    }
}

#[cfg(feature = "async")]
impl apiwrap_interface::r#async::AsyncDriver for MockDriver {
    async fn fetch(
        &self,
        request: &RequestImpl,
        options: &RequestOptions,
    ) -> Result<Response, DriverError> {
        self.respond(request, options)
    }
}

fn append_header(headers: &mut Headers, name: &str, suffix: &str) {
    match headers.get_mut(name) {
        Some(value) => value.push_str(suffix),
        None => {
            headers.insert(name, suffix);
        }
    }
}

/// Appends its tag to `x-request-id` and `x-response-id`.
pub(crate) struct Tag(pub(crate) &'static str);

impl crate::middleware::Middleware for Tag {
    fn process_request(&self, request: &mut crate::Request) -> crate::Result<()> {
        append_header(request.headers_mut(), "x-request-id", self.0);
        Ok(())
    }

    fn process_response(&self, mut response: Response) -> crate::Result<Response> {
        append_header(&mut response.headers, "x-response-id", self.0);
        Ok(response)
    }
}
