//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the probe logic and the
//! outside world. The default implementations live in the `adapters` module.

mod http_requester;

pub use http_requester::HttpRequester;
#[cfg(test)]
pub use http_requester::MockHttpRequester;
