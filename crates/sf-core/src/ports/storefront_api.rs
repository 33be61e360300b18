use async_trait::async_trait;

use super::errors::ApiError;
use crate::catalog::{Brand, Category, ProductPage, ProductQuery, SubSubcategory, Subcategory};

/// Catalog endpoints of the storefront REST API.
#[async_trait]
pub trait StorefrontApiPort: Send + Sync {
    async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError>;

    async fn fetch_subcategories(&self) -> Result<Vec<Subcategory>, ApiError>;

    async fn fetch_sub_subcategories(&self) -> Result<Vec<SubSubcategory>, ApiError>;

    async fn fetch_brands(&self) -> Result<Vec<Brand>, ApiError>;

    async fn fetch_products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError>;
}
