//! Domain models for htcap
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`HttpResponse`] - What a requester saw when fetching a probe URL
//! - [`TestResult`] - Tri-state [`Status`] plus diagnostic info
//! - [`Capability`] - The allow-listed capability questions
//! - [`TestDefinition`] - Fixture files plus interpretation rules for one probe
//! - [`TestIdentity`] - Structural cache key of a tester

mod capability;
mod definition;
mod http_response;
mod identity;
mod test_result;

pub use capability::Capability;
pub(crate) use capability::validate_module_name;
pub use definition::{Condition, FixtureFile, Interpretation, TestDefinition};
pub use http_response::{HttpResponse, TRANSPORT_FAILURE};
pub use identity::{ProbeKey, TestIdentity};
pub use test_result::{Status, TestResult};
