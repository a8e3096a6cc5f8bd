use apiwrap_interface::r#async::AsyncDriver;
use apiwrap_interface::client::RequestOptions;
use apiwrap_interface::{Request, Response, Result as DriverResult};
use tokio::runtime::Handle;

use crate::client::{execute, ReqwestDriver};
use crate::error::ReqwestDriverError;

impl AsyncDriver for ReqwestDriver {
    fn describe(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReqwestDriver")
    }

    async fn fetch(&self, request: &Request, options: &RequestOptions) -> DriverResult<Response> {
        let client = self.client(options)?;
        let task = execute(client, request.clone(), options.clone());
        if Handle::try_current().is_ok() {
            return Ok(task.await?);
        }
        // reqwest needs a tokio reactor; outside one, hop onto the managed runtime.
        let response = self
            .async_runtime()?
            .spawn(task)
            .await
            .map_err(ReqwestDriverError::Tokio)??;
        Ok(response)
    }
}
