//! The probing facade
//!
//! [`HtaccessProber`] answers capability questions about the server serving
//! `base_url` from `base_dir`. Each question builds the matching tester, runs
//! it at most once per identity (results are memoized in the prober's own
//! [`TestResultCache`]) and returns the tri-state status. The diagnostic text
//! of the last question is kept in [`HtaccessProber::info_from_last_test`].
//!
//! ```no_run
//! use htcap::prober::HtaccessProber;
//!
//! let mut prober = HtaccessProber::new("/var/www/html/htcap", "http://localhost/htcap");
//! match prober.can_rewrite()?.as_option() {
//!     Some(true) => println!("rewriting works"),
//!     Some(false) => println!("rewriting does not work"),
//!     None => println!("unknown: {}", prober.info_from_last_test()),
//! }
//! # Ok::<(), htcap::error::ProbeError>(())
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::core::models::{Capability, Status, TestDefinition, TestResult};
use crate::core::ports::HttpRequester;
use crate::core::services::TestResultCache;
use crate::error::ProbeError;
use crate::testers::{CapabilityTester, CrashTester, CustomTester, Tester};

/// Orchestrates capability probes against one base directory / URL pair
pub struct HtaccessProber {
    base_dir: PathBuf,
    base_url: String,
    requester: Option<Arc<dyn HttpRequester>>,
    cache: TestResultCache,
    info_from_last_test: String,
}

impl HtaccessProber {
    /// Create a prober
    ///
    /// `base_dir` must be served by the web server at `base_url`.
    pub fn new(base_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            base_url: base_url.into(),
            requester: None,
            cache: TestResultCache::new(),
            info_from_last_test: String::new(),
        }
    }

    /// Use `requester` for every following probe instead of the default transport
    pub fn set_http_requester(&mut self, requester: Arc<dyn HttpRequester>) {
        self.requester = Some(requester);
    }

    /// Builder-style [`set_http_requester`](Self::set_http_requester)
    #[must_use]
    pub fn with_http_requester(mut self, requester: Arc<dyn HttpRequester>) -> Self {
        self.set_http_requester(requester);
        self
    }

    /// Diagnostic info of the most recent probe (may be set on success too)
    #[must_use]
    pub fn info_from_last_test(&self) -> &str {
        &self.info_from_last_test
    }

    /// Results memoized so far
    #[must_use]
    pub const fn cache(&self) -> &TestResultCache {
        &self.cache
    }

    /// Directory fixtures are staged in
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// URL that serves the base directory
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run `tester` unless its identity is cached, record its info, return its status
    ///
    /// A failed run (broken harness) is propagated and not cached.
    pub fn run_test(&mut self, tester: &mut dyn Tester) -> Result<Status, ProbeError> {
        Ok(self.run_test_for_result(tester)?.status)
    }

    fn run_test_for_result(&mut self, tester: &mut dyn Tester) -> Result<TestResult, ProbeError> {
        if let Some(requester) = &self.requester {
            tester.set_http_requester(Arc::clone(requester));
        }

        let identity = tester.identity();
        let result = if let Some(cached) = self.cache.get_cached(&identity) {
            debug!("cache hit for {}", identity.probe);
            cached.clone()
        } else {
            debug!("running {}", identity.probe);
            let result = tester.run()?;
            self.cache.cache(identity, result.clone());
            result
        };

        self.info_from_last_test.clone_from(&result.info);
        Ok(result)
    }

    /// Probe a capability and return the full result
    pub fn probe(&mut self, capability: &Capability) -> Result<TestResult, ProbeError> {
        let mut tester = CapabilityTester::new(&self.base_dir, &self.base_url, capability.clone());
        self.run_test_for_result(&mut tester)
    }

    /// Probe a capability by its allow-listed method name
    ///
    /// Accepts `canRewrite`, `canRewrite()`, `moduleLoaded(rewrite)` and so on.
    /// Unknown names fail with [`ProbeError::UnsupportedMethod`] before any
    /// fixture is written or request made.
    pub fn call_method(&mut self, method: &str) -> Result<Status, ProbeError> {
        let capability: Capability = method.parse()?;
        self.run_capability(&capability)
    }

    /// Dispatch to the named method for `capability`
    pub fn run_capability(&mut self, capability: &Capability) -> Result<Status, ProbeError> {
        match capability {
            Capability::HtaccessEnabled => self.htaccess_enabled(),
            Capability::ModuleLoaded(name) => self.module_loaded(name),
            Capability::Rewrite => self.can_rewrite(),
            Capability::AddType => self.can_add_type(),
            Capability::SetResponseHeader => self.can_set_response_header(),
            Capability::SetRequestHeader => self.can_set_request_header(),
            Capability::ContentDigest => self.can_content_digest(),
            Capability::SetServerSignature => self.can_set_server_signature(),
            Capability::SetDirectoryIndex => self.can_set_directory_index(),
            Capability::PassEnvThroughRequestHeader => self.can_pass_env_through_request_header(),
            Capability::PassEnvThroughRewrite => self.can_pass_env_through_rewrite(),
        }
    }

    fn run_builtin(&mut self, capability: Capability) -> Result<Status, ProbeError> {
        Ok(self.probe(&capability)?.status)
    }

    /// Are `.htaccess` files processed at all?
    pub fn htaccess_enabled(&mut self) -> Result<Status, ProbeError> {
        self.run_builtin(Capability::HtaccessEnabled)
    }

    /// Is the Apache module `module_name` (e.g. `rewrite`) loaded?
    pub fn module_loaded(&mut self, module_name: &str) -> Result<Status, ProbeError> {
        self.run_builtin(Capability::module_loaded(module_name)?)
    }

    /// Do rewrite rules work?
    pub fn can_rewrite(&mut self) -> Result<Status, ProbeError> {
        self.run_builtin(Capability::Rewrite)
    }

    /// Does `AddType` work?
    pub fn can_add_type(&mut self) -> Result<Status, ProbeError> {
        self.run_builtin(Capability::AddType)
    }

    /// Can a response header be set with `Header`?
    pub fn can_set_response_header(&mut self) -> Result<Status, ProbeError> {
        self.run_builtin(Capability::SetResponseHeader)
    }

    /// Can a request header be set with `RequestHeader`?
    pub fn can_set_request_header(&mut self) -> Result<Status, ProbeError> {
        self.run_builtin(Capability::SetRequestHeader)
    }

    /// Does `ContentDigest` work?
    pub fn can_content_digest(&mut self) -> Result<Status, ProbeError> {
        self.run_builtin(Capability::ContentDigest)
    }

    /// Does `ServerSignature` work?
    pub fn can_set_server_signature(&mut self) -> Result<Status, ProbeError> {
        self.run_builtin(Capability::SetServerSignature)
    }

    /// Does `DirectoryIndex` work?
    pub fn can_set_directory_index(&mut self) -> Result<Status, ProbeError> {
        self.run_builtin(Capability::SetDirectoryIndex)
    }

    /// Can an environment variable reach the script through `RequestHeader`?
    pub fn can_pass_env_through_request_header(&mut self) -> Result<Status, ProbeError> {
        self.run_builtin(Capability::PassEnvThroughRequestHeader)
    }

    /// Can an environment variable set in a rewrite rule reach the script?
    pub fn can_pass_env_through_rewrite(&mut self) -> Result<Status, ProbeError> {
        self.run_builtin(Capability::PassEnvThroughRewrite)
    }

    /// Crash-test `rules` in `crash-tests/<sub_dir>`
    ///
    /// Without `sub_dir`, or with a blank one, a directory name is derived
    /// from the rules.
    pub fn crash_test(&mut self, rules: &str, sub_dir: Option<&str>) -> Result<Status, ProbeError> {
        let mut tester = CrashTester::new(&self.base_dir, &self.base_url, rules, sub_dir);
        self.run_test(&mut tester)
    }

    /// Run a caller-defined test
    pub fn custom_test(&mut self, definition: TestDefinition) -> Result<Status, ProbeError> {
        let mut tester = CustomTester::new(&self.base_dir, &self.base_url, definition);
        self.run_test(&mut tester)
    }
}

impl std::fmt::Debug for HtaccessProber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtaccessProber")
            .field("base_dir", &self.base_dir)
            .field("base_url", &self.base_url)
            .field("custom_requester", &self.requester.is_some())
            .field("cached_results", &self.cache.len())
            .finish()
    }
}
