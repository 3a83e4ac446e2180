//! htcap - find out which `.htaccess` directives a live web server honors
//!
//! This library writes small override-file fixtures below a directory served
//! by the web server, requests the matching URLs and reads success, failure
//! or "can't tell" out of the responses. Results are memoized per probe
//! identity, so asking the same question twice costs one request.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;
pub mod output;
pub mod paths;
pub mod prober;
pub mod testers;

pub use crate::core::models::{Capability, HttpResponse, Status, TestDefinition, TestResult};
pub use crate::core::ports::HttpRequester;
pub use crate::error::ProbeError;
pub use crate::prober::HtaccessProber;
