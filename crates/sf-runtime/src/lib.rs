//! # sf-runtime
//!
//! Composition root of the pet storefront client: loads configuration,
//! initializes tracing, wires the adapters into the use cases and hosts
//! them in the [`StorefrontShell`].

pub mod bootstrap;
pub mod shell;

pub use shell::{Screen, StorefrontShell};
