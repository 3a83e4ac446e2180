//! Configuration management
//!
//! Settings come from a TOML file: an explicit `--config` path, else
//! `./htcap.toml`, else `~/.htcap/config.toml`. Command-line flags override
//! whatever the file says.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::paths;

/// htcap configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Directory the probe fixtures are written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,

    /// URL at which the web server serves `base_dir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Modules probed with `moduleLoaded` by the report command
    #[serde(default = "default_modules")]
    pub modules: Vec<String>,

    /// Transport settings
    #[serde(default)]
    pub http: HttpSettings,
}

/// Settings for the default HTTP transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with each probe
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept self-signed or otherwise invalid TLS certificates
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_modules() -> Vec<String> {
    vec!["rewrite".to_string(), "headers".to_string(), "mime".to_string()]
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("htcap/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            base_url: None,
            modules: default_modules(),
            http: HttpSettings::default(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            accept_invalid_certs: false,
        }
    }
}

impl ProbeConfig {
    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file; errors are reported, not swallowed
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Load the explicit file if given, else the first default location that exists
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        for candidate in [paths::local_config(), paths::global_config()] {
            if candidate.exists() {
                log::debug!("using config {}", candidate.display());
                return Self::load_from(&candidate);
            }
        }
        Ok(Self::default())
    }

    /// Apply command-line overrides
    #[must_use]
    pub fn with_overrides(mut self, base_dir: Option<PathBuf>, base_url: Option<String>) -> Self {
        if base_dir.is_some() {
            self.base_dir = base_dir;
        }
        if base_url.is_some() {
            self.base_url = base_url;
        }
        self
    }

    /// The base dir / URL pair, or an error naming what is missing
    pub fn target(&self) -> anyhow::Result<(PathBuf, String)> {
        let base_dir = self
            .base_dir
            .clone()
            .context("no base directory configured (use --base-dir or base_dir in htcap.toml)")?;
        let base_url = self
            .base_url
            .clone()
            .context("no base URL configured (use --base-url or base_url in htcap.toml)")?;
        Ok((base_dir, base_url))
    }
}
