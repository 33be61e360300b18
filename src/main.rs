use std::path::PathBuf;

use anyhow::Context;
use sf_core::config::StorefrontSettings;
use sf_runtime::bootstrap::{self, tracing::init_tracing_subscriber};
use tracing::info;

/// Config file override, checked before the platform config dir.
const CONFIG_ENV: &str = "STOREFRONT_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let config_path = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .or_else(bootstrap::default_config_path);
    let config = match &config_path {
        Some(path) => bootstrap::load_config_or_empty(path)?,
        None => sf_core::config::AppConfig::empty(),
    };
    let settings = StorefrontSettings::from_config(&config);

    init_tracing_subscriber(settings.log_to_file)?;
    if let Some(path) = &config_path {
        info!(config = %path.display(), "configuration loaded");
    }

    let path = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    let deps = bootstrap::wire_dependencies(&settings, "/")
        .context("failed to wire storefront dependencies")?;

    let screen = bootstrap::run_shell(deps, &path).await?;
    println!("{screen:?}");
    Ok(())
}
