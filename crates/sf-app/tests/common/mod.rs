#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{oneshot, watch, Notify};
use tracing_subscriber::EnvFilter;

use sf_core::authorization::AccessRole;
use sf_core::bootstrap::BootstrapSource;
use sf_core::catalog::{CatalogSnapshot, ProductQuery};
use sf_core::ports::{
    ApiError, CatalogStorePort, IdentityVerifierPort, NavigationError, NavigatorPort,
    ProtectedOutlet, SessionPort, StoreError, VerificationError,
};
use sf_core::session::{Credential, Session, User};

/// Route use case logs to the test output; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Let spawned tasks run on the current-thread test runtime.
pub async fn settle_tasks() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

pub fn signed_in(token: &str) -> Session {
    Session::signed_in(User::new("owner@pets.io"), Credential::new(token))
}

// ----- session -----

pub struct FakeSession {
    tx: watch::Sender<Session>,
}

impl FakeSession {
    pub fn new(session: Session) -> Arc<Self> {
        let (tx, _rx) = watch::channel(session);
        Arc::new(Self { tx })
    }

    pub fn set(&self, session: Session) {
        self.tx.send_replace(session);
    }
}

impl SessionPort for FakeSession {
    fn current(&self) -> Session {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    fn sign_in(&self, identity: User, credential: Credential) {
        self.set(Session::signed_in(identity, credential));
    }

    fn logout(&self) {
        self.set(Session::empty());
    }
}

// ----- outlet -----

#[derive(Default)]
pub struct RecordingOutlet {
    pub mounts: AtomicUsize,
    pub unmounts: AtomicUsize,
}

impl RecordingOutlet {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn mounts(&self) -> usize {
        self.mounts.load(Ordering::SeqCst)
    }

    pub fn unmounts(&self) -> usize {
        self.unmounts.load(Ordering::SeqCst)
    }
}

impl ProtectedOutlet for RecordingOutlet {
    fn mount(&self) {
        self.mounts.fetch_add(1, Ordering::SeqCst);
    }

    fn unmount(&self) {
        self.unmounts.fetch_add(1, Ordering::SeqCst);
    }
}

// ----- navigator -----

pub struct RecordingNavigator {
    location: watch::Sender<String>,
    pub pushes: Mutex<Vec<String>>,
    pub replaces: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new(start: &str) -> Arc<Self> {
        let (location, _rx) = watch::channel(start.to_string());
        Arc::new(Self {
            location,
            pushes: Mutex::new(Vec::new()),
            replaces: Mutex::new(Vec::new()),
        })
    }

    pub fn replaces(&self) -> Vec<String> {
        self.replaces.lock().unwrap().clone()
    }

    pub fn pushes(&self) -> Vec<String> {
        self.pushes.lock().unwrap().clone()
    }
}

impl NavigatorPort for RecordingNavigator {
    fn current(&self) -> String {
        self.location.borrow().clone()
    }

    fn push(&self, path: &str) -> Result<(), NavigationError> {
        self.pushes.lock().unwrap().push(path.to_string());
        self.location.send_replace(path.to_string());
        Ok(())
    }

    fn replace(&self, path: &str) -> Result<(), NavigationError> {
        self.replaces.lock().unwrap().push(path.to_string());
        self.location.send_replace(path.to_string());
        Ok(())
    }

    fn back(&self) -> Result<(), NavigationError> {
        Err(NavigationError::NoHistory)
    }

    fn subscribe(&self) -> watch::Receiver<String> {
        self.location.subscribe()
    }
}

// ----- verifier -----

/// Answers by token prefix:
/// `valid*` ok, `expired*` 401, `offline*` network error,
/// `hold*` waits for `release` then ok, `hold-fail*` waits then 401.
#[derive(Default)]
pub struct ScriptedVerifier {
    pub calls: AtomicUsize,
    pub roles: Mutex<Vec<AccessRole>>,
    pub release: Notify,
}

impl ScriptedVerifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityVerifierPort for ScriptedVerifier {
    async fn verify(
        &self,
        role: AccessRole,
        credential: &Credential,
    ) -> Result<(), VerificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.roles.lock().unwrap().push(role);

        let token = credential.as_str();
        if token.starts_with("hold") {
            self.release.notified().await;
            if token.starts_with("hold-fail") {
                return Err(VerificationError::Rejected { status: 401 });
            }
            return Ok(());
        }
        if token.starts_with("valid") {
            Ok(())
        } else if token.starts_with("offline") {
            Err(VerificationError::Network("connection refused".into()))
        } else {
            Err(VerificationError::Rejected { status: 401 })
        }
    }
}

// ----- catalog store -----

type Gate = oneshot::Receiver<Result<(), StoreError>>;

/// Every fetch blocks until the test resolves it through the matching sender.
pub struct GatedCatalogStore {
    gates: Mutex<HashMap<BootstrapSource, Gate>>,
    pub started: Mutex<Vec<BootstrapSource>>,
    pub product_queries: Mutex<Vec<ProductQuery>>,
}

pub type Releases = HashMap<BootstrapSource, oneshot::Sender<Result<(), StoreError>>>;

impl GatedCatalogStore {
    pub fn new() -> (Arc<Self>, Releases) {
        let mut gates = HashMap::new();
        let mut releases = HashMap::new();
        for source in BootstrapSource::ALL {
            let (tx, rx) = oneshot::channel();
            gates.insert(source, rx);
            releases.insert(source, tx);
        }
        (
            Arc::new(Self {
                gates: Mutex::new(gates),
                started: Mutex::new(Vec::new()),
                product_queries: Mutex::new(Vec::new()),
            }),
            releases,
        )
    }

    async fn wait(&self, source: BootstrapSource) -> Result<(), StoreError> {
        self.started.lock().unwrap().push(source);
        let gate = self.gates.lock().unwrap().remove(&source);
        match gate {
            Some(gate) => gate.await.unwrap_or(Ok(())),
            None => Ok(()),
        }
    }

    pub fn started(&self) -> Vec<BootstrapSource> {
        self.started.lock().unwrap().clone()
    }
}

pub fn fetch_failure(slice: &'static str) -> StoreError {
    StoreError::Fetch {
        slice,
        source: ApiError::Status {
            status: 500,
            message: "Internal Server Error".into(),
        },
    }
}

#[async_trait]
impl CatalogStorePort for GatedCatalogStore {
    async fn load_category_tree(&self) -> Result<(), StoreError> {
        self.wait(BootstrapSource::CategoryTree).await
    }

    async fn load_subcategories(&self) -> Result<(), StoreError> {
        self.wait(BootstrapSource::Subcategories).await
    }

    async fn load_sub_subcategories(&self) -> Result<(), StoreError> {
        self.wait(BootstrapSource::SubSubcategories).await
    }

    async fn load_brands(&self) -> Result<(), StoreError> {
        self.wait(BootstrapSource::Brands).await
    }

    async fn load_products(&self, query: &ProductQuery) -> Result<(), StoreError> {
        self.product_queries.lock().unwrap().push(query.clone());
        self.wait(BootstrapSource::InitialProducts).await
    }

    fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot::default()
    }
}
