//! HTTP response model
//!
//! The minimal view of a response that probes need: body, status code and headers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Status code used when the transport itself failed (no HTTP exchange happened)
pub const TRANSPORT_FAILURE: u16 = 0;

/// A response returned by an [`HttpRequester`](crate::core::ports::HttpRequester)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HttpResponse {
    /// Response body (or an error description when the request failed)
    pub body: String,

    /// HTTP status code, `0` when the request failed before a response arrived
    pub status_code: u16,

    /// Response headers, name -> value
    pub headers: HashMap<String, String>,
}

impl HttpResponse {
    /// Create a response
    pub fn new(
        body: impl Into<String>,
        status_code: u16,
        headers: HashMap<String, String>,
    ) -> Self {
        Self {
            body: body.into(),
            status_code,
            headers,
        }
    }

    /// Create a response representing a failed request
    ///
    /// The body carries the explanation so interpreters can surface it.
    pub fn transport_failure(url: &str, reason: impl std::fmt::Display) -> Self {
        Self {
            body: format!("The following request failed: {url} ({reason})"),
            status_code: TRANSPORT_FAILURE,
            headers: HashMap::new(),
        }
    }

    /// Whether the transport failed to produce a response at all
    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        self.status_code == TRANSPORT_FAILURE
    }

    /// Look up a header value, ignoring ASCII case of the name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The first `max` characters of the body, for diagnostics
    #[must_use]
    pub fn body_excerpt(&self, max: usize) -> String {
        let trimmed = self.body.trim();
        if trimmed.chars().count() <= max {
            return trimmed.to_string();
        }
        let mut excerpt: String = trimmed.chars().take(max).collect();
        excerpt.push_str("...");
        excerpt
    }
}
