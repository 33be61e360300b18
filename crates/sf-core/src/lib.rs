//! # sf-core
//!
//! Core domain models and business logic for the pet storefront client.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod authorization;
pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod ports;
pub mod routing;
pub mod session;

// Re-export commonly used types at the crate root
pub use authorization::{AccessRole, AuthorizationDecision};
pub use bootstrap::{AttemptStatus, BootstrapAttempt, BootstrapOutcome, BootstrapSource};
pub use catalog::{
    Brand, CatalogSnapshot, Category, Product, ProductPage, ProductQuery, SortDirection,
    SortField, SubSubcategory, Subcategory,
};
pub use config::AppConfig;
pub use routing::{AccessRequirement, RouteTable};
pub use session::{Credential, Session, User};
