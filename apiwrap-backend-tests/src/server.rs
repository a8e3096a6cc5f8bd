//! A local HTTP/1 server whose routes are registered by individual fixtures.

use std::collections::HashMap;
use std::convert::Infallible;
use std::future::Future;
use std::io;
use std::net::Ipv4Addr;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::OnceCell;

/// What a route handler produces: the response to send, and the request itself if it
/// did not look the way the fixture expected.
pub(crate) type Outcome = (Response<Full<Bytes>>, Result<(), Request<Incoming>>);

type Handler = Arc<dyn Fn(Request<Incoming>) -> BoxFuture<'static, Outcome> + Send + Sync>;

struct Route {
    handler: Handler,
    rejected: Option<String>,
}

static ROUTES: LazyLock<Mutex<HashMap<String, Route>>> = LazyLock::new(Default::default);

fn routes() -> MutexGuard<'static, HashMap<String, Route>> {
    ROUTES.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Unregisters its route when dropped, failing the test if the route rejected a request.
#[must_use]
pub(crate) struct RouteGuard {
    path: String,
}

impl Drop for RouteGuard {
    fn drop(&mut self) {
        let rejected = routes().remove(&self.path).and_then(|route| route.rejected);
        if let Some(request) = rejected {
            if !std::thread::panicking() {
                panic!("{} received an unexpected request: {request}", self.path);
            }
        }
    }
}

/// Serves `handler` at `path` until the returned guard is dropped.
pub(crate) fn route<F, Fut>(path: &str, handler: F) -> RouteGuard
where
    F: Fn(Request<Incoming>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Outcome> + Send + 'static,
{
    let path = format!("/{}", path.trim_start_matches('/'));
    let route = Route {
        handler: Arc::new(move |request| handler(request).boxed()),
        rejected: None,
    };
    let previous = routes().insert(path.clone(), route);
    assert!(previous.is_none(), "{path} is served by two fixtures");
    RouteGuard { path }
}

async fn serve(request: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = request.uri().path().to_owned();
    let handler = routes().get(&path).map(|route| Arc::clone(&route.handler));
    let Some(handler) = handler else {
        let mut response = Response::new(Full::from("no fixture serves this path"));
        *response.status_mut() = StatusCode::NOT_FOUND;
        return Ok(response);
    };

    let (response, verdict) = handler(request).await;
    if let Err(request) = verdict {
        if let Some(route) = routes().get_mut(&path) {
            route.rejected.get_or_insert_with(|| format!("{request:?}"));
        }
    }
    Ok(response)
}

async fn listen() -> io::Result<String> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let connection = http1::Builder::new().serve_connection(TokioIo::new(stream), service_fn(serve));
            tokio::spawn(async move {
                if let Err(err) = connection.await {
                    eprintln!("fixture connection failed: {err}");
                }
            });
        }
    });
    Ok(format!("http://{addr}"))
}

/// Base URL of the fixture server, started on first use.
pub(crate) async fn server_url() -> io::Result<String> {
    static BASE_URL: OnceCell<String> = OnceCell::const_new();
    BASE_URL.get_or_try_init(listen).await.cloned()
}
