//! Async client.
//!
//! The chain is built from the same [`Middleware`](crate::middleware::Middleware) objects
//! as the blocking one. The only suspension points are the driver call and the extra
//! requests of an [`AuthFlow`](crate::auth::AuthFlow). All returned futures are `Send`.

mod chain;
pub(crate) mod client;

pub use apiwrap_interface::r#async::{AnyAsyncDriver, AsyncDriver};
pub use chain::{call_next, Next};
pub use client::AsyncClient;
