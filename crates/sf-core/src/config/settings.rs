//! Resolved runtime settings.
//!
//! Turns the raw [`AppConfig`] facts into typed settings, filling in
//! storefront defaults where the file left a value empty or unparsable.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use super::AppConfig;
use crate::catalog::{ProductQuery, SortDirection, SortField};
use crate::routing::is_local_path;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_REDIRECT_PATH: &str = "/";
pub const DEFAULT_COUNTDOWN_SECS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout: Duration,
}

/// Countdown redirector inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectSettings {
    pub target: String,
    pub seconds: u32,
}

impl Default for RedirectSettings {
    fn default() -> Self {
        Self {
            target: DEFAULT_REDIRECT_PATH.to_string(),
            seconds: DEFAULT_COUNTDOWN_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontSettings {
    pub api: ApiSettings,
    pub initial_products: ProductQuery,
    pub redirect: RedirectSettings,
    /// `None` keeps the session in memory only.
    pub session_file: Option<PathBuf>,
    pub log_to_file: bool,
}

impl StorefrontSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        let defaults = ProductQuery::default();

        let sort = parse_or(&config.initial_product_sort, defaults.sort, "initial_product_sort");
        let direction = parse_or(
            &config.initial_product_direction,
            defaults.direction,
            "initial_product_direction",
        );
        let limit = positive_or(
            config.initial_product_limit,
            defaults.limit,
            "initial_product_limit",
        );

        Self {
            api: ApiSettings {
                base_url: non_empty(&config.api_base_url, DEFAULT_API_BASE_URL)
                    .trim_end_matches('/')
                    .to_string(),
                timeout: Duration::from_secs(positive_or(
                    config.api_timeout_secs,
                    DEFAULT_API_TIMEOUT.as_secs(),
                    "api_timeout_secs",
                )),
            },
            initial_products: ProductQuery::new(limit, sort, direction),
            redirect: RedirectSettings {
                target: local_path_or_default(&config.redirect_fallback_path),
                seconds: positive_or(
                    config.redirect_countdown_secs,
                    DEFAULT_COUNTDOWN_SECS,
                    "redirect_countdown_secs",
                ),
            },
            session_file: if config.session_file.as_os_str().is_empty() {
                None
            } else {
                Some(config.session_file.clone())
            },
            log_to_file: config.log_to_file,
        }
    }
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::empty())
    }
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Zero means absent. Negative or oversized values are misconfigurations.
fn positive_or<T: TryFrom<i64>>(raw: i64, fallback: T, key: &str) -> T {
    if raw == 0 {
        return fallback;
    }
    match T::try_from(raw) {
        Ok(value) if raw > 0 => value,
        _ => {
            warn!(key, value = raw, "out of range config value, using default");
            fallback
        }
    }
}

fn local_path_or_default(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return DEFAULT_REDIRECT_PATH.to_string();
    }
    if is_local_path(raw) {
        raw.to_string()
    } else {
        warn!(
            key = "redirect_fallback_path",
            value = raw,
            "redirect target is not a storefront path, using default"
        );
        DEFAULT_REDIRECT_PATH.to_string()
    }
}

fn parse_or<T: std::str::FromStr<Err = String>>(raw: &str, fallback: T, key: &str) -> T {
    if raw.is_empty() {
        return fallback;
    }
    raw.parse().unwrap_or_else(|err: String| {
        warn!(key, error = %err, "unparsable config value, using default");
        fallback
    })
}
