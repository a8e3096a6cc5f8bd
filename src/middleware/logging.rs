use tracing::{error, info};

use super::Middleware;
use crate::{Error, Request, Response, Result};

/// Logs every request, response and error through `tracing`.
///
/// Errors are logged and re-raised unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn process_request(&self, request: &mut Request) -> Result<()> {
        info!(method = %request.method(), url = request.url(), "request");
        Ok(())
    }

    fn process_response(&self, response: Response) -> Result<Response> {
        info!(status = response.status_code, url = %response.url, "response");
        Ok(response)
    }

    fn process_exception(&self, request: &Request, error: Error) -> Result<Response> {
        error!(method = %request.method(), url = request.url(), %error, "request failed");
        Err(error)
    }
}
