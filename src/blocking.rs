//! Blocking client.
//!
//! The whole middleware chain runs on the calling thread; the driver blocks inside
//! [`BlockingDriver::fetch`](apiwrap_interface::blocking::BlockingDriver::fetch).

mod chain;
pub(crate) mod client;

pub use apiwrap_interface::blocking::BlockingDriver;
pub use chain::{call_next, Next};
pub use client::BlockingClient;
