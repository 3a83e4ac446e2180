//! Command implementations

mod crash;
mod custom;
mod list;
mod probe;
mod report;

use std::sync::Arc;

use htcap::adapters::http::ReqwestRequester;
use htcap::config::ProbeConfig;
use htcap::prober::HtaccessProber;

pub use crash::crash;
pub use custom::custom;
pub use list::list;
pub use probe::probe;
pub use report::report;

/// Build a prober for the configured target using the reqwest transport
fn prober_for(config: &ProbeConfig) -> anyhow::Result<HtaccessProber> {
    let (base_dir, base_url) = config.target()?;
    let requester = ReqwestRequester::new(&config.http)?;
    Ok(HtaccessProber::new(base_dir, base_url).with_http_requester(Arc::new(requester)))
}
