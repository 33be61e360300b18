use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use sf_core::authorization::AccessRole;
use sf_core::catalog::{Brand, Category, ProductPage, ProductQuery, SubSubcategory, Subcategory};
use sf_core::config::ApiSettings;
use sf_core::ports::{ApiError, IdentityVerifierPort, StorefrontApiPort, VerificationError};
use sf_core::session::Credential;

use super::wire::{ErrorBody, Listing, ProductListing};

const CATEGORIES: &str = "/api/categories";
const SUBCATEGORIES: &str = "/api/subcategories";
const SUB_SUBCATEGORIES: &str = "/api/subsubcategories";
const BRANDS: &str = "/api/brands";
const PRODUCTS: &str = "/api/products";
const VERIFY_USER: &str = "/api/auth/verify-user";
const VERIFY_ADMIN: &str = "/api/auth/verify-admin";

/// Stateless client for the storefront REST API.
///
/// Every request carries the configured timeout, so a hung server turns
/// into an error instead of a fetch that never settles.
#[derive(Clone)]
pub struct HttpStorefrontApi {
    client: Client,
    base_url: String,
}

impl HttpStorefrontApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, ?query, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let response = ensure_success(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(format!("{url}: {e}")))
    }

    async fn get_listing<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        self.get_json::<Listing<T>>(path, &[])
            .await
            .map(Listing::into_items)
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Network(format!("{url}: request timed out"))
    } else {
        ApiError::Network(format!("{url}: {err}"))
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or_else(|_| reason(status));

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("unexpected status")
        .to_string()
}

#[async_trait]
impl StorefrontApiPort for HttpStorefrontApi {
    async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_listing(CATEGORIES).await
    }

    async fn fetch_subcategories(&self) -> Result<Vec<Subcategory>, ApiError> {
        self.get_listing(SUBCATEGORIES).await
    }

    async fn fetch_sub_subcategories(&self) -> Result<Vec<SubSubcategory>, ApiError> {
        self.get_listing(SUB_SUBCATEGORIES).await
    }

    async fn fetch_brands(&self) -> Result<Vec<Brand>, ApiError> {
        self.get_listing(BRANDS).await
    }

    async fn fetch_products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        self.get_json::<ProductListing>(PRODUCTS, &query.to_query_pairs())
            .await
            .map(ProductListing::into_page)
    }
}

#[async_trait]
impl IdentityVerifierPort for HttpStorefrontApi {
    async fn verify(
        &self,
        role: AccessRole,
        credential: &Credential,
    ) -> Result<(), VerificationError> {
        let url = self.url(match role {
            AccessRole::User => VERIFY_USER,
            AccessRole::Admin => VERIFY_ADMIN,
        });

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, credential.bearer())
            .send()
            .await
            .map_err(|e| VerificationError::Network(transport_error(&url, e).to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(%role, "credential accepted");
            Ok(())
        } else {
            debug!(%role, status = status.as_u16(), "credential rejected");
            Err(VerificationError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
