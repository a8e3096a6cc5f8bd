use std::fmt;
use std::future::Future;

use apiwrap_interface::blocking::BlockingDriver;
use apiwrap_interface::client::RequestOptions;
use apiwrap_interface::{Request, Response, Result as DriverResult};
use tokio::runtime::{Handle, Runtime};

use crate::client::{execute, ReqwestDriver};
use crate::error::Result;

impl BlockingDriver for ReqwestDriver {
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReqwestDriver")
    }

    fn fetch(&self, request: &Request, options: &RequestOptions) -> DriverResult<Response> {
        let client = self.client(options)?;
        let response = execute_with_runtime(
            || self.blocking_runtime(),
            || execute(client, request.clone(), options.clone()),
        )?;
        Ok(response)
    }
}

/// Drives `task` to completion on the ambient tokio runtime if there is one, otherwise on
/// the driver's managed runtime.
fn execute_with_runtime<'a, R, F, Fut, T>(managed_runtime: R, task: F) -> Result<T>
where
    R: FnOnce() -> Result<&'a Runtime>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if Handle::try_current().is_ok() {
        tokio::task::block_in_place(|| Handle::current().block_on(task()))
    } else {
        managed_runtime()?.block_on(task())
    }
}
