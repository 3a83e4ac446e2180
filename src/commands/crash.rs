//! Crash-test a set of rules

use std::fs;
use std::path::Path;

use anyhow::Context;
use htcap::config::ProbeConfig;
use htcap::core::models::TestResult;
use htcap::output::{OutputMode, ProbeOutcome};

use super::prober_for;

/// Stage the rules from `rules_file` and report whether the server survives them
pub fn crash(
    config: &ProbeConfig,
    rules_file: &Path,
    subdir: Option<&str>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let rules = fs::read_to_string(rules_file)
        .with_context(|| format!("failed to read rules from {}", rules_file.display()))?;

    let mut prober = prober_for(config)?;
    let status = prober.crash_test(&rules, subdir)?;

    let result = TestResult::new(status, prober.info_from_last_test());
    ProbeOutcome::new("crashTest", result).render(mode);
    Ok(())
}
