//! Crash tester
//!
//! Stages arbitrary `.htaccess` rules and checks whether the server still
//! answers. Lets callers find out if a ruleset they are about to deploy would
//! take a directory down.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use super::{Tester, TesterBase};
use crate::core::models::{ProbeKey, TestIdentity, TestResult};
use crate::core::ports::HttpRequester;
use crate::core::services::probes;
use crate::error::ProbeError;

/// Runs a crash test of user-supplied rules
#[derive(Debug)]
pub struct CrashTester {
    base: TesterBase,
    rules: String,
    subdir: String,
}

impl CrashTester {
    /// Create a crash tester
    ///
    /// Without `subdir` (or with a blank one), a name is derived from a hash of
    /// the rules. The rules must never land in `crash-tests/` itself, where
    /// they would apply to every other crash test.
    pub fn new(
        base_dir: impl Into<PathBuf>,
        base_url: impl Into<String>,
        rules: impl Into<String>,
        subdir: Option<&str>,
    ) -> Self {
        let rules = rules.into();
        let subdir = subdir
            .filter(|s| !s.trim().is_empty())
            .map_or_else(|| probes::crash_subdir(&rules), ToString::to_string);
        Self {
            base: TesterBase::new(base_dir, base_url),
            rules,
            subdir,
        }
    }

    /// Subdirectory below `crash-tests/` the rules are staged in
    #[must_use]
    pub fn subdir(&self) -> &str {
        &self.subdir
    }
}

impl Tester for CrashTester {
    fn identity(&self) -> TestIdentity {
        TestIdentity::new(
            self.base.base_dir(),
            self.base.base_url(),
            ProbeKey::Crash {
                rules: self.rules.clone(),
                subdir: self.subdir.clone(),
            },
        )
    }

    fn set_http_requester(&mut self, requester: Arc<dyn HttpRequester>) {
        self.base.set_http_requester(requester);
    }

    fn run(&self) -> Result<TestResult, ProbeError> {
        let names_a_directory =
            Path::new(&self.subdir).components().any(|c| matches!(c, Component::Normal(_)));
        if !names_a_directory {
            return Err(ProbeError::InvalidDefinition(format!(
                "crash-test subdir {:?} must name a directory below {}/",
                self.subdir,
                probes::CRASH_TEST_DIR
            )));
        }
        self.base.run_definition(&probes::crash_test(&self.rules, &self.subdir))
    }
}
