//! List the probe names accepted by `htcap probe`

use htcap::core::models::Capability;
use htcap::output::OutputMode;

/// Print the allow-listed capability names
#[allow(clippy::unnecessary_wraps)]
pub fn list(mode: OutputMode) -> anyhow::Result<()> {
    let names = Capability::allowed_names();
    if mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(&names).unwrap_or_default());
    } else {
        println!("Available probes:\n");
        for name in &names {
            println!("  {name}");
        }
    }
    Ok(())
}
