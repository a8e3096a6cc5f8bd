use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use apiwrap_interface::client::{ClientCert, RequestOptions, Verify};
use apiwrap_interface::{Request, Response};
use reqwest::{Certificate, Client, Identity};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::error::{ReqwestDriverError, Result};

/// A driver performing exchanges with [`reqwest`].
///
/// Cloning is cheap; clones share connection pools and the managed runtimes.
#[derive(Clone, Default)]
pub struct ReqwestDriver {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    clients: Mutex<HashMap<TlsConfig, Client>>,
    #[cfg_attr(not(feature = "blocking"), allow(dead_code))]
    blocking_runtime: OnceLock<Runtime>,
    #[cfg_attr(not(feature = "async"), allow(dead_code))]
    async_runtime: OnceLock<Runtime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TlsConfig {
    verify: Verify,
    cert: Option<ClientCert>,
}

impl ReqwestDriver {
    /// Creates a driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the client for the TLS settings of `options`, building it on first use.
    pub(crate) fn client(&self, options: &RequestOptions) -> Result<Client> {
        let tls = TlsConfig {
            verify: options.verify.clone(),
            cert: options.cert.clone(),
        };
        let mut clients = self
            .inner
            .clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = clients.get(&tls) {
            return Ok(client.clone());
        }
        debug!(?tls, "building reqwest client");
        let client = build_reqwest_client(&tls)?;
        clients.insert(tls, client.clone());
        Ok(client)
    }

    #[cfg(feature = "blocking")]
    pub(crate) fn blocking_runtime(&self) -> Result<&Runtime> {
        managed_runtime(&self.inner.blocking_runtime, || {
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
        })
    }

    #[cfg(feature = "async")]
    pub(crate) fn async_runtime(&self) -> Result<&Runtime> {
        managed_runtime(&self.inner.async_runtime, || {
            tokio::runtime::Builder::new_multi_thread()
                .thread_name("apiwrap-reqwest-async")
                .worker_threads(1)
                .enable_all()
                .build()
        })
    }
}

fn managed_runtime(
    cell: &OnceLock<Runtime>,
    create: impl FnOnce() -> std::io::Result<Runtime>,
) -> Result<&Runtime> {
    if let Some(runtime) = cell.get() {
        return Ok(runtime);
    }
    let runtime = create().map_err(ReqwestDriverError::Runtime)?;
    Ok(cell.get_or_init(|| runtime))
}

fn read_pem(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| ReqwestDriverError::Certificate {
        path: path.display().to_string(),
        source,
    })
}

fn build_reqwest_client(tls: &TlsConfig) -> Result<Client> {
    let mut builder = Client::builder();

    match &tls.verify {
        Verify::Enabled => {}
        Verify::Disabled => {
            builder = builder.danger_accept_invalid_certs(true);
        }
        Verify::CaBundle(path) => {
            builder = builder.tls_built_in_root_certs(false);
            for cert in Certificate::from_pem_bundle(&read_pem(path)?)? {
                builder = builder.add_root_certificate(cert);
            }
        }
    }

    if let Some(cert) = &tls.cert {
        let pem = match cert {
            ClientCert::Pem(path) => read_pem(path)?,
            ClientCert::Pair { cert, key } => {
                let mut pem = read_pem(cert)?;
                pem.push(b'\n');
                pem.extend(read_pem(key)?);
                pem
            }
        };
        builder = builder.identity(Identity::from_pem(&pem)?);
    }

    Ok(builder.build()?)
}

/// Performs one exchange. Must run inside a tokio runtime.
pub(crate) async fn execute(
    client: Client,
    request: Request,
    options: RequestOptions,
) -> Result<Response> {
    let response = crate::request::build_request(&client, &request, &options)?
        .send()
        .await?;
    crate::response::collect_response(request, response).await
}
