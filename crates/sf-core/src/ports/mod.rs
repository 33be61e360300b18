//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases (bootstrap sequencer,
//! authorization gate, countdown redirector) and the infrastructure that
//! implements them: the HTTP API, the process-wide store, persistence and
//! navigation. Use cases depend only on these traits, so every one of them
//! can be driven by fakes in tests.

pub mod catalog_store;
pub mod errors;
pub mod identity_verifier;
pub mod navigator;
pub mod outlet;
pub mod session;
pub mod session_persistence;
pub mod storefront_api;

pub use catalog_store::CatalogStorePort;
pub use errors::{ApiError, NavigationError, PersistenceError, StoreError, VerificationError};
pub use identity_verifier::IdentityVerifierPort;
pub use navigator::NavigatorPort;
pub use outlet::ProtectedOutlet;
pub use session::SessionPort;
pub use session_persistence::SessionPersistencePort;
pub use storefront_api::StorefrontApiPort;
