//! Business logic services
//!
//! Pure logic operating on domain models:
//!
//! - [`interpreter`] - Turn a response into a tri-state result
//! - [`probes`] - Fixture and rules of each built-in capability probe
//! - [`cache`] - Memoize results per tester identity

pub mod cache;
pub mod interpreter;
pub mod probes;

pub use cache::TestResultCache;
pub use interpreter::{holds, interpret};
