//! Testers: self-contained capability probes
//!
//! A tester stages a fixture under the base directory, requests the matching
//! URL once and interprets the response. Constructing a tester does no I/O,
//! so identical testers can be deduplicated by the cache before anything
//! touches the disk or the network.
//!
//! - [`CapabilityTester`] - One of the built-in capability questions
//! - [`CrashTester`] - Does the server survive arbitrary rules?
//! - [`CustomTester`] - A caller-supplied [`TestDefinition`]

mod capability;
mod crash;
mod custom;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use reqwest::Url;

use crate::adapters::fs::stage_fixture;
use crate::adapters::http::ReqwestRequester;
use crate::core::models::{TestDefinition, TestIdentity, TestResult};
use crate::core::ports::HttpRequester;
use crate::core::services::interpret;
use crate::error::ProbeError;

pub use capability::CapabilityTester;
pub use crash::CrashTester;
pub use custom::CustomTester;

/// The contract every probe fulfils
pub trait Tester {
    /// Structural identity used as the cache key
    fn identity(&self) -> TestIdentity;

    /// Use `requester` instead of the default transport
    fn set_http_requester(&mut self, requester: Arc<dyn HttpRequester>);

    /// Stage the fixture, make the request and interpret the response
    ///
    /// Network trouble ends up in the result. Only a broken harness (invalid
    /// definition, unwritable base directory) is an error.
    fn run(&self) -> Result<TestResult, ProbeError>;
}

/// State shared by every tester: where to stage, where to request, how
pub struct TesterBase {
    base_dir: PathBuf,
    base_url: String,
    requester: Option<Arc<dyn HttpRequester>>,
}

impl TesterBase {
    /// Create a base for `base_dir` served at `base_url`
    pub fn new(base_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            base_url: base_url.into(),
            requester: None,
        }
    }

    /// Directory fixtures are written below
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// URL that serves `base_dir`
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Inject a transport
    pub fn set_http_requester(&mut self, requester: Arc<dyn HttpRequester>) {
        self.requester = Some(requester);
    }

    /// URL the definition's request resolves to
    ///
    /// Every path segment is percent-encoded, so a `#` or `?` in a fixture
    /// name still addresses the directory it was written to. A base URL that
    /// does not parse is joined verbatim and left for the transport to reject.
    #[must_use]
    pub fn url_for(&self, definition: &TestDefinition) -> String {
        let subdir = path_segments(&definition.subdir);
        let mut request = path_segments(&definition.request);
        if request.is_empty() {
            // Trailing slash: the directory itself
            request.push("");
        }

        let Ok(mut url) = Url::parse(&self.base_url) else {
            let path = [subdir, request].concat().join("/");
            return format!("{}/{path}", self.base_url.trim_end_matches('/'));
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(subdir).extend(request);
        }
        url.into()
    }

    /// Run a definition end to end
    pub fn run_definition(&self, definition: &TestDefinition) -> Result<TestResult, ProbeError> {
        definition.validate()?;
        stage_fixture(&self.base_dir, definition)?;

        let url = self.url_for(definition);
        let response = match &self.requester {
            Some(requester) => requester.make_request(&url),
            None => ReqwestRequester::with_defaults()?.make_request(&url),
        };
        debug!("{url} -> status code {}", response.status_code);

        interpret(&response, &definition.interpretation)
    }
}

/// Non-empty path segments, without `.`
fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty() && *segment != ".").collect()
}

impl std::fmt::Debug for TesterBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TesterBase")
            .field("base_dir", &self.base_dir)
            .field("base_url", &self.base_url)
            .field("custom_requester", &self.requester.is_some())
            .finish()
    }
}
