//! Test result cache
//!
//! Memoizes one [`TestResult`] per [`TestIdentity`]. Entries live as long as
//! the cache does: there is no eviction and no expiry, since server
//! capabilities are assumed stable for the duration of a run.
//!
//! The cache is plain owned state with no locking; callers that share a
//! prober across threads must serialize access themselves.

use std::collections::HashMap;

use log::debug;

use crate::core::models::{TestIdentity, TestResult};

/// In-memory store of completed probe results
#[derive(Debug, Default, Clone)]
pub struct TestResultCache {
    entries: HashMap<TestIdentity, TestResult>,
}

impl TestResultCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a result is stored for `identity`
    #[must_use]
    pub fn is_cached(&self, identity: &TestIdentity) -> bool {
        self.entries.contains_key(identity)
    }

    /// The stored result for `identity`, if any
    #[must_use]
    pub fn get_cached(&self, identity: &TestIdentity) -> Option<&TestResult> {
        self.entries.get(identity)
    }

    /// Store `result` for `identity`, replacing any earlier entry
    pub fn cache(&mut self, identity: TestIdentity, result: TestResult) {
        debug!("caching {} => {}", identity.probe, result.status);
        self.entries.insert(identity, result);
    }

    /// Number of cached results
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
