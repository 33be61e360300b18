//! # sf-infra
//!
//! Adapters behind the `sf-core` ports: the storefront REST client, the
//! process-wide store, session persistence and the navigation history.

pub mod http;
pub mod navigation;
pub mod persistence;
pub mod store;

pub use http::HttpStorefrontApi;
pub use navigation::HistoryRouter;
pub use persistence::JsonSessionFile;
pub use store::StorefrontStore;
