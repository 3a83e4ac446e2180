//! Fixture staging
//!
//! Writes a definition's files to `<base_dir>/<subdir>/`. The layout mirrors
//! the URL space: `<base_url>/<subdir>/<request>` serves what was written here.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::core::models::TestDefinition;
use crate::error::ProbeError;

/// Directory a definition's fixture lives in
#[must_use]
pub fn fixture_dir(base_dir: &Path, definition: &TestDefinition) -> PathBuf {
    base_dir.join(&definition.subdir)
}

/// Write every fixture file of `definition` below `base_dir`
///
/// Existing files are overwritten. Returns the fixture directory.
pub fn stage_fixture(base_dir: &Path, definition: &TestDefinition) -> Result<PathBuf, ProbeError> {
    let dir = fixture_dir(base_dir, definition);

    for file in &definition.files {
        let path = dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ProbeError::Fixture {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &file.content).map_err(|source| ProbeError::Fixture {
            path: path.clone(),
            source,
        })?;
        debug!("wrote fixture {}", path.display());
    }

    Ok(dir)
}
