//! Error types for htcap
//!
//! Anything a probe can learn from a live server is folded into a
//! [`TestResult`](crate::core::models::TestResult). These errors only cover a
//! broken harness: bad dispatch keys, bad definitions, unwritable fixtures.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the probing harness
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A capability name outside the allow-list was dispatched
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// A module name that cannot be used in a fixture path or `<IfModule>`
    #[error("invalid module name: {0:?} (only letters, digits and '_' are allowed)")]
    InvalidModuleName(String),

    /// A test definition that cannot be staged or interpreted
    #[error("invalid test definition: {0}")]
    InvalidDefinition(String),

    /// A fixture file could not be written
    #[error("failed to write fixture {}: {source}", path.display())]
    Fixture {
        /// The file or directory that could not be written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The default HTTP transport could not be constructed
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
