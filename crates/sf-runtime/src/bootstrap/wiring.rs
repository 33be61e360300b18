//! # Dependency Injection
//!
//! ## Responsibilities
//!
//! - Create the infra implementations (HTTP client, store, persistence,
//!   history router)
//! - Hand them out as port trait objects for the shell and use cases
//!
//! ## Prohibited
//!
//! - No business logic: wiring never decides what a failed fetch or a
//!   missing session means
//! - No configuration validation: settings arrive already resolved
//!
//! > This is the only place allowed to depend on `sf-infra` and `sf-app`
//! > at the same time. The privilege is for assembly, not for decisions.

use std::sync::Arc;

use sf_core::config::StorefrontSettings;
use sf_core::ports::{
    CatalogStorePort, IdentityVerifierPort, NavigatorPort, SessionPersistencePort, SessionPort,
    StorefrontApiPort,
};
use sf_infra::{HistoryRouter, HttpStorefrontApi, JsonSessionFile, StorefrontStore};
use tracing::info;

pub type WiringResult<T> = Result<T, WiringError>;

/// Errors while assembling the infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),

    #[error("Navigation initialization failed: {0}")]
    NavigationInit(String),
}

/// Everything the shell needs, already behind ports.
#[derive(Clone)]
pub struct StorefrontDeps {
    pub catalog: Arc<dyn CatalogStorePort>,
    pub session: Arc<dyn SessionPort>,
    pub verifier: Arc<dyn IdentityVerifierPort>,
    pub navigator: Arc<dyn NavigatorPort>,
    pub settings: StorefrontSettings,
}

/// Assemble the default adapters for `settings`, starting history at
/// `start_path`.
pub fn wire_dependencies(
    settings: &StorefrontSettings,
    start_path: &str,
) -> WiringResult<StorefrontDeps> {
    let api = Arc::new(
        HttpStorefrontApi::new(&settings.api)
            .map_err(|e| WiringError::HttpClientInit(e.to_string()))?,
    );

    let persistence = settings.session_file.as_ref().map(|path| {
        info!(path = %path.display(), "session persistence enabled");
        Arc::new(JsonSessionFile::new(path)) as Arc<dyn SessionPersistencePort>
    });

    let store = Arc::new(StorefrontStore::new(
        Arc::clone(&api) as Arc<dyn StorefrontApiPort>,
        persistence,
    ));

    let navigator = HistoryRouter::new(start_path)
        .map_err(|e| WiringError::NavigationInit(e.to_string()))?;

    info!(base_url = %api.base_url(), start_path, "storefront dependencies wired");

    Ok(StorefrontDeps {
        catalog: Arc::clone(&store) as Arc<dyn CatalogStorePort>,
        session: store,
        verifier: api,
        navigator: Arc::new(navigator),
        settings: settings.clone(),
    })
}
