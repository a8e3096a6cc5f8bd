//! Blocking driver interface.
//!
//! A blocking driver performs one exchange per call and returns once the whole
//! response has been received.

mod driver;

pub use driver::BlockingDriver;
