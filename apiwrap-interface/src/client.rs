//! Per-request transport options.
//!
//! Clients carry a set of [`RequestOptions`] as their defaults. Each call may override
//! any of them through [`FetchOptions`], where every field is an [`Override`] so that
//! "not given" stays distinguishable from an explicit `None`.

mod options;

pub use options::{
    ClientCert, FetchOptions, Override, RequestOptions, Timeout, Verify, DEFAULT_TIMEOUT,
};
