//! Blocking reqwest transport
//!
//! The default `HttpRequester`. Every network-level error is folded into a
//! status-0 response, never returned as an error.

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::Client;

use crate::config::HttpSettings;
use crate::core::models::HttpResponse;
use crate::core::ports::HttpRequester;
use crate::error::ProbeError;

/// `HttpRequester` backed by `reqwest::blocking`
#[derive(Debug, Clone)]
pub struct ReqwestRequester {
    client: Client,
}

impl ReqwestRequester {
    /// Build a requester from transport settings
    pub fn new(settings: &HttpSettings) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()?;
        Ok(Self { client })
    }

    /// Build a requester with default settings
    pub fn with_defaults() -> Result<Self, ProbeError> {
        Self::new(&HttpSettings::default())
    }
}

impl HttpRequester for ReqwestRequester {
    fn make_request(&self, url: &str) -> HttpResponse {
        debug!("GET {url}");

        let response = match self.client.get(url).send() {
            Ok(response) => response,
            Err(e) => {
                warn!("request to {url} failed: {e}");
                return HttpResponse::transport_failure(url, e);
            },
        };

        let status_code = response.status().as_u16();
        let headers = collect_headers(response.headers());

        match response.text() {
            Ok(body) => {
                debug!("{url} answered {status_code} ({} bytes)", body.len());
                HttpResponse::new(body, status_code, headers)
            },
            Err(e) => {
                warn!("reading the body of {url} failed: {e}");
                HttpResponse::transport_failure(url, e)
            },
        }
    }
}

/// Flatten a header map, joining repeated headers with ", "
fn collect_headers(map: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    let mut headers: HashMap<String, String> = HashMap::new();
    for (name, value) in map {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        headers
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    headers
}
