//! Async driver interface.
//!
//! Driver implementations provide [`AsyncDriver`]; the facade stores them behind
//! [`AnyAsyncDriver`], which every `AsyncDriver` gets through a blanket impl.

mod any;
mod driver;

pub use any::AnyAsyncDriver;
pub use driver::AsyncDriver;
