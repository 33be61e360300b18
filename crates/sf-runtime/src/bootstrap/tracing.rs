//! Tracing configuration for the storefront client.
//!
//! Structured logging with spans: the use cases open `usecase.*` spans and
//! everything below logs through `tracing` macros.
//!
//! - Development builds log at debug level, release builds at info.
//! - `RUST_LOG` overrides the default directives.
//! - Logs go to stdout and, when enabled, to a file in the platform log dir.

use std::path::PathBuf;
use std::sync::OnceLock;
use std::{fs, io};

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_NAME: &str = "pet-storefront.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default filter directives.
///
/// Our crates follow the build profile; HTTP internals stay quiet.
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        "hyper=warn".to_string(),
        "hyper_util=warn".to_string(),
        "reqwest=info".to_string(),
        "rustls=warn".to_string(),
        format!("sf_app={level}"),
        format!("sf_infra={level}"),
        format!("sf_runtime={level}"),
        format!("pet_storefront={level}"),
    ]
}

/// Initialize the global tracing subscriber.
///
/// Call once from `main` before anything logs. With `log_to_file` the
/// stdout layer is joined by a plain-text file layer; if the log dir can't
/// be prepared the subscriber falls back to stdout only.
///
/// # Errors
///
/// Returns `Err` if a global subscriber is already registered.
pub fn init_tracing_subscriber(log_to_file: bool) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives.join(",")));

    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(BoxMakeWriter::new(io::stdout));

    let file_writer = if log_to_file {
        match build_file_writer() {
            Ok(writer) => Some(writer),
            Err(err) => {
                eprintln!("Failed to initialize file logging, falling back to stdout: {err:#}");
                None
            }
        }
    } else {
        None
    };

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("tracing subscriber already initialized")?;

    Ok(())
}

/// `<platform data dir>/pet-storefront/logs`.
pub fn log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("pet-storefront").join("logs"))
}

fn build_file_writer() -> anyhow::Result<NonBlocking> {
    let logs_dir = log_dir().context("no platform data directory")?;
    fs::create_dir_all(&logs_dir)
        .with_context(|| format!("create log dir failed: {}", logs_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
