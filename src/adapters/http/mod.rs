//! HTTP transport adapters
//!
//! Implements `HttpRequester` on top of a blocking reqwest client.

mod reqwest_requester;

pub use reqwest_requester::ReqwestRequester;
