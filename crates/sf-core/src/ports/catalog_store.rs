//! Store collaborator: the fetch operations the bootstrap sequencer fires.

use async_trait::async_trait;

use super::errors::StoreError;
use crate::catalog::{CatalogSnapshot, ProductQuery};

/// Each operation fetches one catalog slice and replaces it in the store.
/// A failed operation leaves its slice as it was.
#[async_trait]
pub trait CatalogStorePort: Send + Sync {
    async fn load_category_tree(&self) -> Result<(), StoreError>;

    async fn load_subcategories(&self) -> Result<(), StoreError>;

    async fn load_sub_subcategories(&self) -> Result<(), StoreError>;

    async fn load_brands(&self) -> Result<(), StoreError>;

    async fn load_products(&self, query: &ProductQuery) -> Result<(), StoreError>;

    /// Current contents of every slice.
    fn snapshot(&self) -> CatalogSnapshot;
}
