//! Storefront shell.
//!
//! Hosts the bootstrap sequence and the router. Until the catalog has
//! settled the shell shows a loading screen; afterwards every location
//! change resolves to a page, wrapping protected pages in a fresh
//! authorization gate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use sf_app::{
    BootstrapHost, BootstrapSequencer, CountdownRedirector, GateHandle, RouteAuthorizationGate,
};
use sf_core::authorization::AuthorizationDecision;
use sf_core::bootstrap::BootstrapOutcome;
use sf_core::catalog::CatalogSnapshot;
use sf_core::config::settings::DEFAULT_REDIRECT_PATH;
use sf_core::config::RedirectSettings;
use sf_core::ports::{NavigationError, ProtectedOutlet, SessionPort};
use sf_core::routing::{is_local_path, normalize, RouteTable};

use crate::bootstrap::StorefrontDeps;

/// What the user currently sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Page { path: String },
    Verifying { path: String },
    AccessDenied { path: String, remaining: u32 },
}

/// Stand-in for a rendered page: records whether it is on screen.
struct PageOutlet {
    path: String,
    mounted: AtomicBool,
}

impl PageOutlet {
    fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            mounted: AtomicBool::new(false),
        }
    }

    fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }
}

impl ProtectedOutlet for PageOutlet {
    fn mount(&self) {
        if !self.mounted.swap(true, Ordering::SeqCst) {
            debug!(path = %self.path, "page mounted");
        }
    }

    fn unmount(&self) {
        if self.mounted.swap(false, Ordering::SeqCst) {
            debug!(path = %self.path, "page unmounted");
        }
    }
}

struct ActiveRoute {
    path: String,
    page: Arc<PageOutlet>,
    gate: Option<GateHandle>,
}

impl Drop for ActiveRoute {
    fn drop(&mut self) {
        // Gated pages are unmounted by their gate.
        if self.gate.is_none() {
            self.page.unmount();
        }
    }
}

pub struct StorefrontShell {
    deps: StorefrontDeps,
    routes: RouteTable,
    sequencer: Arc<BootstrapSequencer>,
    redirector: CountdownRedirector,
    host: Option<BootstrapHost>,
    active: Option<ActiveRoute>,
}

impl StorefrontShell {
    pub fn new(deps: StorefrontDeps) -> Self {
        Self::with_routes(deps, RouteTable::storefront())
    }

    pub fn with_routes(deps: StorefrontDeps, routes: RouteTable) -> Self {
        let sequencer = Arc::new(BootstrapSequencer::new(
            Arc::clone(&deps.catalog),
            deps.settings.initial_products.clone(),
        ));
        let redirect = safe_redirect(&deps.settings.redirect, &routes);
        let redirector = CountdownRedirector::new(Arc::clone(&deps.navigator), redirect);

        Self {
            deps,
            routes,
            sequencer,
            redirector,
            host: None,
            active: None,
        }
    }

    /// Mount the bootstrap sequence. Calling it again while mounted is a
    /// no-op.
    pub fn boot(&mut self) {
        if self.host.is_none() {
            info!("booting storefront");
            self.host = Some(self.sequencer.mount());
        }
    }

    pub fn is_booted(&self) -> bool {
        self.host.as_ref().is_some_and(BootstrapHost::is_booted)
    }

    /// Wait for the catalog to settle, then render the current location.
    pub async fn wait_booted(&mut self) -> bool {
        let booted = match self.host.as_mut() {
            Some(host) => host.wait_booted().await,
            None => false,
        };
        if booted {
            self.sync_route();
        }
        booted
    }

    pub fn bootstrap_outcome(&self) -> Option<BootstrapOutcome> {
        self.host.as_ref().and_then(BootstrapHost::outcome)
    }

    pub fn catalog(&self) -> CatalogSnapshot {
        self.deps.catalog.snapshot()
    }

    pub fn session(&self) -> &Arc<dyn SessionPort> {
        &self.deps.session
    }

    /// Push `path` onto the history and render it.
    pub fn navigate(&mut self, path: &str) -> Result<(), NavigationError> {
        self.deps.navigator.push(path)?;
        self.sync_route();
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), NavigationError> {
        self.deps.navigator.back()?;
        self.sync_route();
        Ok(())
    }

    /// Re-render if the history moved since the last render. Does nothing
    /// before boot.
    pub fn sync_route(&mut self) {
        if !self.is_booted() {
            return;
        }
        let location = self.deps.navigator.current();
        let path = normalize(&location).to_string();
        if self.active.as_ref().is_some_and(|active| active.path == path) {
            return;
        }
        self.enter(path);
    }

    fn enter(&mut self, path: String) {
        // Leave the previous page first so its gate is gone before the next
        // one mounts.
        self.active = None;

        let page = Arc::new(PageOutlet::new(&path));
        let requirement = self.routes.requirement_for(&path);
        let gate = match requirement.role() {
            Some(role) => {
                let gate = RouteAuthorizationGate::new(
                    role,
                    Arc::clone(&self.deps.session),
                    Arc::clone(&self.deps.verifier),
                    self.redirector.clone(),
                );
                Some(gate.mount(Arc::clone(&page) as Arc<dyn ProtectedOutlet>))
            }
            None => {
                page.mount();
                None
            }
        };

        info!(%path, ?requirement, "route entered");
        self.active = Some(ActiveRoute { path, page, gate });
    }

    pub fn decision(&self) -> Option<AuthorizationDecision> {
        self.active
            .as_ref()
            .and_then(|active| active.gate.as_ref())
            .map(GateHandle::decision)
    }

    pub fn is_page_mounted(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.page.is_mounted())
    }

    pub fn screen(&self) -> Screen {
        let Some(active) = self.active.as_ref().filter(|_| self.is_booted()) else {
            return Screen::Loading;
        };
        let path = active.path.clone();

        let Some(gate) = active.gate.as_ref() else {
            return Screen::Page { path };
        };
        match gate.decision() {
            AuthorizationDecision::Pending => Screen::Verifying { path },
            AuthorizationDecision::Granted => Screen::Page { path },
            AuthorizationDecision::Denied => Screen::AccessDenied {
                path,
                remaining: gate.countdown_remaining().unwrap_or(0),
            },
        }
    }

    /// Wait until the current route's gate, if any, has decided.
    pub async fn settle_route(&mut self) -> Screen {
        if let Some(gate) = self.active.as_mut().and_then(|active| active.gate.as_mut()) {
            gate.settled().await;
        }
        self.screen()
    }

    /// The redirect target actually used by denied routes.
    pub fn redirect_target(&self) -> &str {
        &self.redirector.settings().target
    }

    /// While access is denied, wait for the countdown's redirect and render
    /// wherever it lands.
    ///
    /// Returns the current screen if the countdown ends without moving the
    /// history.
    pub async fn follow_redirect(&mut self) -> Screen {
        let mut location = self.deps.navigator.subscribe();
        self.sync_route();

        while matches!(self.screen(), Screen::AccessDenied { .. }) {
            let Some(mut countdown) = self
                .active
                .as_ref()
                .and_then(|active| active.gate.as_ref())
                .and_then(GateHandle::subscribe_countdown)
            else {
                break;
            };

            tokio::select! {
                changed = location.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = countdown_ended(&mut countdown) => {
                    if !location.has_changed().unwrap_or(false) {
                        warn!(target_path = %self.redirect_target(), "countdown ended without a redirect");
                        break;
                    }
                }
            }
            self.sync_route();
        }
        self.settle_route().await
    }
}

/// Resolves once the countdown task is gone, finished or cancelled.
async fn countdown_ended(countdown: &mut watch::Receiver<u32>) {
    while countdown.changed().await.is_ok() {}
}

/// Denied visitors must land somewhere they can see.
fn safe_redirect(settings: &RedirectSettings, routes: &RouteTable) -> RedirectSettings {
    let target = &settings.target;
    let reason = if !is_local_path(target) {
        Some("not a storefront path")
    } else if routes.requirement_for(target).is_gated() {
        Some("target route is gated")
    } else {
        None
    };

    match reason {
        Some(reason) => {
            warn!(target_path = %target, reason, fallback = DEFAULT_REDIRECT_PATH, "unsafe redirect target");
            RedirectSettings {
                target: DEFAULT_REDIRECT_PATH.to_string(),
                seconds: settings.seconds,
            }
        }
        None => settings.clone(),
    }
}
