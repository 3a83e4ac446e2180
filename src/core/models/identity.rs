//! Tester identity
//!
//! Two testers built with the same kind and the same parameters are the same
//! test. The cache keys on this value, never on object identity.

use std::path::PathBuf;

use super::{Capability, TestDefinition};

/// Which probe a tester runs, including every parameter that changes its outcome
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProbeKey {
    /// A built-in capability probe
    Capability(Capability),
    /// A crash test of arbitrary rules in a given subdirectory
    Crash {
        /// The `.htaccess` content under test
        rules: String,
        /// Subdirectory below `crash-tests/`
        subdir: String,
    },
    /// A caller-defined test
    Custom(TestDefinition),
}

/// Structural cache key of a tester
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestIdentity {
    /// Directory the fixtures are written to
    pub base_dir: PathBuf,
    /// URL corresponding to `base_dir`
    pub base_url: String,
    /// Probe kind and parameters
    pub probe: ProbeKey,
}

impl TestIdentity {
    /// Create an identity
    pub fn new(base_dir: impl Into<PathBuf>, base_url: impl Into<String>, probe: ProbeKey) -> Self {
        Self {
            base_dir: base_dir.into(),
            base_url: base_url.into(),
            probe,
        }
    }
}

impl std::fmt::Display for ProbeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Capability(capability) => write!(f, "{capability}"),
            Self::Crash { subdir, .. } => write!(f, "crashTest({subdir})"),
            Self::Custom(definition) => write!(f, "customTest({})", definition.subdir),
        }
    }
}
