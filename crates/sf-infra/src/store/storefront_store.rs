use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use sf_core::catalog::{
    Brand, CatalogSnapshot, Category, ProductPage, ProductQuery, SubSubcategory, Subcategory,
};
use sf_core::ports::{
    ApiError, CatalogStorePort, SessionPersistencePort, SessionPort, StorefrontApiPort,
    StoreError,
};
use sf_core::session::{Credential, Session, User};

/// Catalog slices and the session, shared by every screen.
///
/// Each slice sits behind its own lock and is replaced wholesale by its
/// fetch; a failed fetch leaves the slice untouched. The session lives in a
/// watch channel so gates observe changes, and is written through to the
/// persistence adapter when one is configured.
pub struct StorefrontStore {
    api: Arc<dyn StorefrontApiPort>,
    persistence: Option<Arc<dyn SessionPersistencePort>>,
    categories: RwLock<Vec<Category>>,
    subcategories: RwLock<Vec<Subcategory>>,
    sub_subcategories: RwLock<Vec<SubSubcategory>>,
    brands: RwLock<Vec<Brand>>,
    products: RwLock<ProductPage>,
    session: watch::Sender<Session>,
}

impl StorefrontStore {
    /// Build the store, restoring a previously saved session if there is one.
    pub fn new(
        api: Arc<dyn StorefrontApiPort>,
        persistence: Option<Arc<dyn SessionPersistencePort>>,
    ) -> Self {
        let restored = persistence
            .as_deref()
            .map(restore_session)
            .unwrap_or_default();
        let (session, _rx) = watch::channel(restored);

        Self {
            api,
            persistence,
            categories: RwLock::default(),
            subcategories: RwLock::default(),
            sub_subcategories: RwLock::default(),
            brands: RwLock::default(),
            products: RwLock::default(),
            session,
        }
    }

    pub fn categories(&self) -> Vec<Category> {
        read(&self.categories)
    }

    pub fn subcategories(&self) -> Vec<Subcategory> {
        read(&self.subcategories)
    }

    pub fn sub_subcategories(&self) -> Vec<SubSubcategory> {
        read(&self.sub_subcategories)
    }

    pub fn brands(&self) -> Vec<Brand> {
        read(&self.brands)
    }

    pub fn products(&self) -> ProductPage {
        read(&self.products)
    }

    fn set_session(&self, next: Session) {
        let changed = self.session.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next.clone();
            true
        });
        if !changed {
            return;
        }

        let Some(persistence) = self.persistence.as_deref() else {
            return;
        };
        let result = if next.is_empty() {
            persistence.clear()
        } else {
            persistence.save(&next)
        };
        if let Err(err) = result {
            warn!(error = %err, "failed to persist session");
        }
    }
}

fn restore_session(persistence: &dyn SessionPersistencePort) -> Session {
    match persistence.load() {
        Ok(Some(session)) => {
            info!(signed_in = session.identity.is_some(), "restored saved session");
            session
        }
        Ok(None) => Session::empty(),
        Err(err) => {
            warn!(error = %err, "ignoring unreadable saved session");
            Session::empty()
        }
    }
}

fn read<T: Clone>(slot: &RwLock<T>) -> T {
    slot.read().unwrap_or_else(PoisonError::into_inner).clone()
}

fn replace<T>(slot: &RwLock<T>, value: T) {
    *slot.write().unwrap_or_else(PoisonError::into_inner) = value;
}

fn fetch_failed(slice: &'static str) -> impl FnOnce(ApiError) -> StoreError {
    move |source| StoreError::Fetch { slice, source }
}

#[async_trait]
impl CatalogStorePort for StorefrontStore {
    async fn load_category_tree(&self) -> Result<(), StoreError> {
        let categories = self
            .api
            .fetch_categories()
            .await
            .map_err(fetch_failed("categories"))?;
        debug!(count = categories.len(), "categories loaded");
        replace(&self.categories, categories);
        Ok(())
    }

    async fn load_subcategories(&self) -> Result<(), StoreError> {
        let subcategories = self
            .api
            .fetch_subcategories()
            .await
            .map_err(fetch_failed("subcategories"))?;
        debug!(count = subcategories.len(), "subcategories loaded");
        replace(&self.subcategories, subcategories);
        Ok(())
    }

    async fn load_sub_subcategories(&self) -> Result<(), StoreError> {
        let leaves = self
            .api
            .fetch_sub_subcategories()
            .await
            .map_err(fetch_failed("sub-subcategories"))?;
        debug!(count = leaves.len(), "sub-subcategories loaded");
        replace(&self.sub_subcategories, leaves);
        Ok(())
    }

    async fn load_brands(&self) -> Result<(), StoreError> {
        let brands = self
            .api
            .fetch_brands()
            .await
            .map_err(fetch_failed("brands"))?;
        debug!(count = brands.len(), "brands loaded");
        replace(&self.brands, brands);
        Ok(())
    }

    async fn load_products(&self, query: &ProductQuery) -> Result<(), StoreError> {
        let page = self
            .api
            .fetch_products(query)
            .await
            .map_err(fetch_failed("products"))?;
        debug!(count = page.products.len(), total = page.total, "products loaded");
        replace(&self.products, page);
        Ok(())
    }

    fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            categories: self.categories(),
            subcategories: self.subcategories(),
            sub_subcategories: self.sub_subcategories(),
            brands: self.brands(),
            products: self.products(),
        }
    }
}

impl SessionPort for StorefrontStore {
    fn current(&self) -> Session {
        self.session.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    fn sign_in(&self, identity: User, credential: Credential) {
        info!(email = %identity.email, "signed in");
        self.set_session(Session::signed_in(identity, credential));
    }

    fn logout(&self) {
        info!("signed out");
        self.set_session(Session::empty());
    }
}
