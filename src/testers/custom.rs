//! Custom tester
//!
//! Runs a caller-supplied [`TestDefinition`] for questions the built-in
//! probes do not cover.

use std::path::PathBuf;
use std::sync::Arc;

use super::{Tester, TesterBase};
use crate::core::models::{ProbeKey, TestDefinition, TestIdentity, TestResult};
use crate::core::ports::HttpRequester;
use crate::error::ProbeError;

/// Runs a fully caller-defined test
#[derive(Debug)]
pub struct CustomTester {
    base: TesterBase,
    definition: TestDefinition,
}

impl CustomTester {
    /// Create a tester for `definition`
    pub fn new(
        base_dir: impl Into<PathBuf>,
        base_url: impl Into<String>,
        definition: TestDefinition,
    ) -> Self {
        Self {
            base: TesterBase::new(base_dir, base_url),
            definition,
        }
    }
}

impl Tester for CustomTester {
    fn identity(&self) -> TestIdentity {
        TestIdentity::new(
            self.base.base_dir(),
            self.base.base_url(),
            ProbeKey::Custom(self.definition.clone()),
        )
    }

    fn set_http_requester(&mut self, requester: Arc<dyn HttpRequester>) {
        self.base.set_http_requester(requester);
    }

    fn run(&self) -> Result<TestResult, ProbeError> {
        self.base.run_definition(&self.definition)
    }
}
