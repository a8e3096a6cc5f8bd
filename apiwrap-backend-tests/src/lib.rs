#![cfg(test)]

use std::io;
use std::sync::LazyLock;

use apiwrap::middleware::Middleware;
use apiwrap::ClientBuilder;
#[allow(unused_imports)]
use http_body_util::{BodyExt, Full};
#[allow(unused_imports)]
use hyper::{
    body::{self, Bytes},
    Request, Response, StatusCode,
};

mod fixtures;
mod request_ext;
mod server;

pub use request_ext::RequestExt;
use server::{route, server_url, Outcome, RouteGuard};

/// Runtime driving the fixture server and the async clients of blocking-flavored tests.
static RT: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .expect("failed to start the fixture runtime")
});

/// Prefixes relative request URLs with the fixture server address.
struct BaseUrl(String);

impl Middleware for BaseUrl {
    fn process_request(&self, request: &mut apiwrap::Request) -> apiwrap::Result<()> {
        if !request.url().contains("://") {
            let path = request.url().trim_start_matches('/').to_owned();
            *request.url_mut() = format!("{}/{path}", self.0);
        }
        Ok(())
    }
}

/// Tags every outgoing request so fixtures can tell the blocking and async runs apart.
struct MarkBlocking;

impl Middleware for MarkBlocking {
    fn process_request(&self, request: &mut apiwrap::Request) -> apiwrap::Result<()> {
        request.headers_mut().insert("blocking", "1");
        Ok(())
    }
}

async fn init_builder() -> io::Result<ClientBuilder> {
    let url = server_url().await?;
    Ok(ClientBuilder::default().middleware(BaseUrl(url)))
}

fn init_builder_blocking() -> io::Result<ClientBuilder> {
    RT.block_on(async {
        init_builder()
            .await
            .map(|cb| cb.middleware(MarkBlocking))
    })
}

fn server_url_blocking() -> io::Result<String> {
    RT.block_on(server_url())
}

/// Sends the request produced by `make` through a blocking client and an async client,
/// in that order, returning the responses of whichever flavors are enabled.
fn send_both(make: impl Fn() -> apiwrap::Request) -> Vec<apiwrap::Response> {
    #[allow(unused_mut)]
    let mut responses = vec![];
    #[cfg(feature = "blocking")]
    {
        let client = init_builder_blocking()
            .unwrap()
            .build_blocking(apiwrap_backend_reqwest::ReqwestDriver::new());
        responses.push(client.send(make()).unwrap());
    }
    #[cfg(feature = "async")]
    {
        let response = RT.block_on(async {
            let client = init_builder()
                .await
                .unwrap()
                .build_async(apiwrap_backend_reqwest::ReqwestDriver::new());
            client.send(make()).await.unwrap()
        });
        responses.push(response);
    }
    responses
}
