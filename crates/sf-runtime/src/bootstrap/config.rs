//! # Configuration Loader
//!
//! ## Responsibilities
//!
//! - Read the TOML configuration file
//! - Parse it into the `AppConfig` DTO
//! - Report I/O and parse errors with context
//!
//! ## Prohibited
//!
//! - No validation logic
//! - No default value logic (see `StorefrontSettings::from_config`)

use std::path::{Path, PathBuf};

use anyhow::Context;
use sf_core::config::AppConfig;

/// Load configuration from a TOML file.
///
/// Accepts whatever is in the file: missing sections and keys become empty
/// values.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Like [`load_config`], but a missing file yields an empty config.
pub fn load_config_or_empty(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        tracing::info!(path = %config_path.display(), "no config file, using defaults");
        return Ok(AppConfig::empty());
    }
    load_config(config_path.to_path_buf())
}

/// `<platform config dir>/pet-storefront/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pet-storefront").join("config.toml"))
}
