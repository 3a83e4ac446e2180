//! Centralized path definitions for htcap
//!
//! ```text
//! ./htcap.toml               # project-local config (checked first)
//! ~/.htcap/config.toml       # user-level config
//! ```

use std::path::PathBuf;

/// Project-local config filename
pub const LOCAL_CONFIG_FILE: &str = "htcap.toml";

/// Global config directory name
const GLOBAL_DIR: &str = ".htcap";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get path to `./htcap.toml`.
#[must_use]
pub fn local_config() -> PathBuf {
    PathBuf::from(LOCAL_CONFIG_FILE)
}

/// Get the global htcap directory.
///
/// Returns `~/.htcap/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.htcap/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
