//! Ask a single capability question

use htcap::config::ProbeConfig;
use htcap::core::models::Capability;
use htcap::output::{OutputMode, ProbeOutcome};

use super::prober_for;

/// Probe one capability by name (e.g. `canRewrite`, `moduleLoaded(headers)`)
pub fn probe(config: &ProbeConfig, name: &str, mode: OutputMode) -> anyhow::Result<()> {
    // Validate before anything touches the base directory
    let capability: Capability = name.parse()?;

    let mut prober = prober_for(config)?;
    let result = prober.probe(&capability)?;

    ProbeOutcome::new(capability.to_string(), result).render(mode);
    Ok(())
}
