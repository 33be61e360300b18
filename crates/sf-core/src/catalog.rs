//! Catalog domain models.
//!
//! Shapes follow the storefront REST API. Ids accept both `id` and the
//! document-store style `_id`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(alias = "category", rename = "categoryId")]
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubSubcategory {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(alias = "subcategory", rename = "subcategoryId")]
    pub subcategory_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, rename = "logoUrl", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default, rename = "subSubcategory")]
    pub sub_subcategory: Option<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of products as returned by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    CreatedAt,
    Price,
    Name,
    Rating,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::Price => "price",
            SortField::Name => "name",
            SortField::Rating => "rating",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" | "created_at" => Ok(SortField::CreatedAt),
            "price" => Ok(SortField::Price),
            "name" => Ok(SortField::Name),
            "rating" => Ok(SortField::Rating),
            other => Err(format!("unknown sort field: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}

/// "First N products sorted by field F direction D".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub limit: u32,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl ProductQuery {
    pub fn new(limit: u32, sort: SortField, direction: SortDirection) -> Self {
        Self {
            limit,
            sort,
            direction,
        }
    }

    /// Query-string pairs understood by the listing endpoint.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("limit", self.limit.to_string()),
            ("sortBy", self.sort.as_str().to_string()),
            ("order", self.direction.as_str().to_string()),
        ]
    }
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new(12, SortField::CreatedAt, SortDirection::Desc)
    }
}

/// Current contents of every catalog slice held by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub categories: Vec<Category>,
    pub subcategories: Vec<Subcategory>,
    pub sub_subcategories: Vec<SubSubcategory>,
    pub brands: Vec<Brand>,
    pub products: ProductPage,
}

impl CatalogSnapshot {
    pub fn subcategories_of<'a>(
        &'a self,
        category_id: &'a str,
    ) -> impl Iterator<Item = &'a Subcategory> + 'a {
        self.subcategories
            .iter()
            .filter(move |sub| sub.category_id == category_id)
    }

    pub fn sub_subcategories_of<'a>(
        &'a self,
        subcategory_id: &'a str,
    ) -> impl Iterator<Item = &'a SubSubcategory> + 'a {
        self.sub_subcategories
            .iter()
            .filter(move |leaf| leaf.subcategory_id == subcategory_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_query_renders_listing_params() {
        let query = ProductQuery::new(8, SortField::Price, SortDirection::Asc);
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("limit", "8".to_string()),
                ("sortBy", "price".to_string()),
                ("order", "asc".to_string()),
            ]
        );
    }

    #[test]
    fn sort_parsing_accepts_api_spellings() {
        assert_eq!("createdAt".parse::<SortField>(), Ok(SortField::CreatedAt));
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("popularity".parse::<SortField>().is_err());
    }

    #[test]
    fn catalog_models_accept_document_ids() {
        let json = r#"[{"_id":"s1","name":"Dry food","category":"c1"}]"#;
        let subs: Vec<Subcategory> = serde_json::from_str(json).unwrap();
        assert_eq!(subs[0].id, "s1");
        assert_eq!(subs[0].category_id, "c1");
    }

    #[test]
    fn snapshot_walks_the_taxonomy() {
        let snapshot = CatalogSnapshot {
            subcategories: vec![
                Subcategory {
                    id: "s1".into(),
                    name: "Dry food".into(),
                    category_id: "dogs".into(),
                },
                Subcategory {
                    id: "s2".into(),
                    name: "Litter".into(),
                    category_id: "cats".into(),
                },
            ],
            sub_subcategories: vec![SubSubcategory {
                id: "l1".into(),
                name: "Puppy".into(),
                subcategory_id: "s1".into(),
            }],
            ..Default::default()
        };

        let dog_subs: Vec<_> = snapshot.subcategories_of("dogs").map(|s| s.id.as_str()).collect();
        assert_eq!(dog_subs, vec!["s1"]);
        assert_eq!(snapshot.sub_subcategories_of("s1").count(), 1);
        assert_eq!(snapshot.sub_subcategories_of("s2").count(), 0);
    }
}
