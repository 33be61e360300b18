//! Process-wide storefront store.

mod storefront_store;

pub use storefront_store::StorefrontStore;
