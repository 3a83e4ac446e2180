//! Run every built-in probe

use anyhow::Context;
use htcap::config::ProbeConfig;
use htcap::core::models::Capability;
use htcap::output::{OutputMode, ProbeOutcome, Report};

use super::prober_for;

/// Probe all fixed capabilities plus `moduleLoaded` for each configured module
pub fn report(config: &ProbeConfig, mode: OutputMode) -> anyhow::Result<()> {
    let mut capabilities = Capability::fixed();
    for module in &config.modules {
        capabilities.push(
            Capability::module_loaded(module)
                .with_context(|| format!("bad module name in config: {module}"))?,
        );
    }

    let mut prober = prober_for(config)?;
    let mut report = Report::new(prober.base_url());

    for capability in &capabilities {
        log::info!("probing {capability}");
        let result = prober.probe(capability)?;
        report.results.push(ProbeOutcome::new(capability.to_string(), result));
    }

    report.render(mode);
    Ok(())
}
