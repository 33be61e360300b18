pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{default_config_path, load_config, load_config_or_empty};
pub use run::run_shell;
pub use wiring::{wire_dependencies, StorefrontDeps, WiringError, WiringResult};
