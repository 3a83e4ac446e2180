//! HTTP requester port
//!
//! Defines the transport used to fetch a probe URL.

use crate::core::models::HttpResponse;

/// Performs one HTTP GET
///
/// Implementations must not fail for ordinary network errors. Instead they
/// return a response with status code `0` and an explanatory body (see
/// [`HttpResponse::transport_failure`]), so that probes can treat a broken
/// transport as an inconclusive signal. Timeouts are the implementation's
/// responsibility.
#[cfg_attr(test, mockall::automock)]
pub trait HttpRequester: Send + Sync {
    /// Fetch `url` and return whatever came back
    fn make_request(&self, url: &str) -> HttpResponse;
}
