use serde::Deserialize;

use sf_core::catalog::{Product, ProductPage};

/// List endpoints answer either with a bare array or with `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum Listing<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> Listing<T> {
    pub(super) fn into_items(self) -> Vec<T> {
        match self {
            Listing::Bare(items) | Listing::Wrapped { data: items } => items,
        }
    }
}

/// The product listing either pages (`{ products, total }`) or returns a
/// bare array, in which case the total is the array length.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ProductListing {
    Page(ProductPage),
    Bare(Vec<Product>),
}

impl ProductListing {
    pub(super) fn into_page(self) -> ProductPage {
        match self {
            ProductListing::Page(page) => page,
            ProductListing::Bare(products) => ProductPage {
                total: products.len() as u64,
                products,
            },
        }
    }
}

/// Error body the API sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(alias = "error")]
    pub(super) message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::catalog::Brand;

    #[test]
    fn listing_accepts_both_shapes() {
        let bare: Listing<Brand> =
            serde_json::from_str(r#"[{"_id":"b1","name":"Whiskas"}]"#).unwrap();
        let wrapped: Listing<Brand> =
            serde_json::from_str(r#"{"data":[{"id":"b1","name":"Whiskas"}]}"#).unwrap();

        assert_eq!(bare.into_items(), wrapped.into_items());
    }

    #[test]
    fn bare_product_array_counts_as_full_page() {
        let listing: ProductListing = serde_json::from_str(
            r#"[{"_id":"p1","name":"Kibble","price":12.5},{"_id":"p2","name":"Leash","price":9}]"#,
        )
        .unwrap();

        let page = listing.into_page();
        assert_eq!(page.total, 2);
        assert_eq!(page.products[1].name, "Leash");
    }
}
