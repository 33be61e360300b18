//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - ✅ Define configuration data structures
//! - ✅ Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! ❌ **No validation logic**
//! ❌ **No default value calculation** (that lives in [`settings`])
//!
//! > **This module contains data only. Missing values are empty facts.**

pub mod settings;

use std::path::PathBuf;

pub use settings::{ApiSettings, RedirectSettings, StorefrontSettings};

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// REST API origin, e.g. `https://api.petshop.example`
    pub api_base_url: String,

    /// Per-request timeout in seconds (0 when absent)
    pub api_timeout_secs: i64,

    /// Size of the first product page loaded at boot
    pub initial_product_limit: i64,

    /// Sort field of the first product page, raw string
    pub initial_product_sort: String,

    /// Sort direction of the first product page, raw string
    pub initial_product_direction: String,

    /// Where the access denied countdown sends the user
    pub redirect_fallback_path: String,

    /// Countdown length in whole seconds
    pub redirect_countdown_secs: i64,

    /// Session persistence file (path info only, no existence check)
    pub session_file: PathBuf,

    /// Also write logs to the platform log directory
    pub log_to_file: bool,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: no validation or default value logic here.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            api_base_url: section(toml_value, "api", "base_url")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            api_timeout_secs: section(toml_value, "api", "timeout_secs")
                .and_then(|v| v.as_integer())
                .unwrap_or(0),
            initial_product_limit: section(toml_value, "bootstrap", "initial_product_limit")
                .and_then(|v| v.as_integer())
                .unwrap_or(0),
            initial_product_sort: section(toml_value, "bootstrap", "initial_product_sort")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            initial_product_direction: section(toml_value, "bootstrap", "initial_product_direction")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            redirect_fallback_path: section(toml_value, "redirect", "fallback_path")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            redirect_countdown_secs: section(toml_value, "redirect", "countdown_secs")
                .and_then(|v| v.as_integer())
                .unwrap_or(0),
            session_file: PathBuf::from(
                section(toml_value, "session", "file")
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            log_to_file: section(toml_value, "logging", "to_file")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self::default()
    }
}

fn section<'a>(value: &'a toml::Value, name: &str, key: &str) -> Option<&'a toml::Value> {
    value.get(name).and_then(|s| s.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_toml_maps_every_section() {
        let value: toml::Value = toml::from_str(
            r#"
            [api]
            base_url = "https://api.petshop.test"
            timeout_secs = 20

            [bootstrap]
            initial_product_limit = 24
            initial_product_sort = "price"
            initial_product_direction = "asc"

            [redirect]
            fallback_path = "/login"
            countdown_secs = 5

            [session]
            file = "/tmp/session.json"

            [logging]
            to_file = true
            "#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&value).unwrap();
        assert_eq!(config.api_base_url, "https://api.petshop.test");
        assert_eq!(config.api_timeout_secs, 20);
        assert_eq!(config.initial_product_limit, 24);
        assert_eq!(config.initial_product_sort, "price");
        assert_eq!(config.initial_product_direction, "asc");
        assert_eq!(config.redirect_fallback_path, "/login");
        assert_eq!(config.redirect_countdown_secs, 5);
        assert_eq!(config.session_file, PathBuf::from("/tmp/session.json"));
        assert!(config.log_to_file);
    }

    #[test]
    fn missing_sections_are_empty_facts() {
        let value: toml::Value = toml::from_str("[api]\n").unwrap();
        let config = AppConfig::from_toml(&value).unwrap();
        assert_eq!(config, AppConfig::empty());
    }
}
