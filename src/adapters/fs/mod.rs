//! Filesystem adapters
//!
//! Writes probe fixtures below the base directory.

mod fixture;

pub use fixture::{fixture_dir, stage_fixture};
