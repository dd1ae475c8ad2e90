//! # Configuration Loader
//!
//! ## Responsibilities
//!
//! - ✅ Read TOML configuration files
//! - ✅ Parse TOML into the AppConfig DTO
//! - ✅ Report I/O and parsing errors with context
//!
//! ## Prohibited
//!
//! ❌ **No validation logic**
//! ❌ **No default value logic** (defaults are applied by `wiring::resolve_settings`)
//!
//! > **Pure data loading only. Accept whatever is in the file.**

use std::path::{Path, PathBuf};

use anyhow::Context;
use cb_core::config::AppConfig;
use tracing::debug;

const CONFIG_DIR: &str = "catalog-browser";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from a TOML file.
///
/// **NO validation is performed**: empty strings and zero timeouts are
/// accepted as they are.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Path of the per-user config file, e.g. `~/.config/catalog-browser/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load `explicit` if given, otherwise the per-user file when it exists,
/// otherwise an empty config.
///
/// An explicit path that cannot be loaded is an error; a missing per-user
/// file is not.
pub fn load_config_or_default(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "loading per-user config");
            load_config(&path)
        }
        _ => Ok(AppConfig::empty()),
    }
}
