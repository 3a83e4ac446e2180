//! Built-in capability tester

use std::path::PathBuf;
use std::sync::Arc;

use super::{Tester, TesterBase};
use crate::core::models::{Capability, ProbeKey, TestIdentity, TestResult, validate_module_name};
use crate::core::ports::HttpRequester;
use crate::core::services::probes;
use crate::error::ProbeError;

/// Runs one of the built-in capability probes
#[derive(Debug)]
pub struct CapabilityTester {
    base: TesterBase,
    capability: Capability,
}

impl CapabilityTester {
    /// Create a tester for `capability`
    pub fn new(
        base_dir: impl Into<PathBuf>,
        base_url: impl Into<String>,
        capability: Capability,
    ) -> Self {
        Self {
            base: TesterBase::new(base_dir, base_url),
            capability,
        }
    }
}

impl Tester for CapabilityTester {
    fn identity(&self) -> TestIdentity {
        TestIdentity::new(
            self.base.base_dir(),
            self.base.base_url(),
            ProbeKey::Capability(self.capability.clone()),
        )
    }

    fn set_http_requester(&mut self, requester: Arc<dyn HttpRequester>) {
        self.base.set_http_requester(requester);
    }

    fn run(&self) -> Result<TestResult, ProbeError> {
        if let Capability::ModuleLoaded(name) = &self.capability {
            validate_module_name(name)?;
        }
        self.base.run_definition(&probes::definition(&self.capability))
    }
}
