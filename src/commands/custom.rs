//! Run a caller-defined test

use std::fs;
use std::path::Path;

use anyhow::Context;
use htcap::config::ProbeConfig;
use htcap::core::models::{TestDefinition, TestResult};
use htcap::output::{OutputMode, ProbeOutcome};

use super::prober_for;

/// Load a definition (JSON if the file ends in `.json`, TOML otherwise) and run it
pub fn custom(
    config: &ProbeConfig,
    definition_file: &Path,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let definition = load_definition(definition_file)?;
    definition.validate()?;

    let name = format!("customTest({})", definition.subdir);
    let mut prober = prober_for(config)?;
    let status = prober.custom_test(definition)?;

    let result = TestResult::new(status, prober.info_from_last_test());
    ProbeOutcome::new(name, result).render(mode);
    Ok(())
}

fn load_definition(path: &Path) -> anyhow::Result<TestDefinition> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read definition {}", path.display()))?;

    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let definition = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(definition)
}
