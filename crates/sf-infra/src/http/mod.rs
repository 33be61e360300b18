//! HTTP adapter for the storefront REST API.

mod client;
mod wire;

pub use client::HttpStorefrontApi;
