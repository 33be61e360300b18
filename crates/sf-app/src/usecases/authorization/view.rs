use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use sf_core::ports::ProtectedOutlet;

use crate::usecases::internal::Liveness;
use crate::usecases::redirect::{CountdownHandle, CountdownRedirector};

/// What one gate mount currently shows: the protected outlet, the denial
/// countdown, or neither.
///
/// Shared between the gate task and its handle so that unmounting can tear
/// the view down synchronously. Every change happens under one lock and is
/// refused once the liveness flag is revoked.
pub(crate) struct MountedView {
    liveness: Liveness,
    outlet: Arc<dyn ProtectedOutlet>,
    redirector: CountdownRedirector,
    inner: Mutex<ViewInner>,
}

#[derive(Default)]
struct ViewInner {
    outlet_mounted: bool,
    countdown: Option<CountdownHandle>,
}

impl MountedView {
    pub(crate) fn new(outlet: Arc<dyn ProtectedOutlet>, redirector: CountdownRedirector) -> Self {
        Self {
            liveness: Liveness::new(),
            outlet,
            redirector,
            inner: Mutex::new(ViewInner::default()),
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.liveness.is_alive()
    }

    pub(crate) fn mount_outlet(&self) {
        let mut inner = self.lock();
        if !self.liveness.is_alive() || inner.outlet_mounted {
            return;
        }
        inner.outlet_mounted = true;
        self.outlet.mount();
    }

    pub(crate) fn unmount_outlet(&self) {
        let mut inner = self.lock();
        Self::unmount_locked(&mut inner, self.outlet.as_ref());
    }

    pub(crate) fn start_countdown(&self) {
        let mut inner = self.lock();
        if !self.liveness.is_alive() || inner.countdown.is_some() {
            return;
        }
        inner.countdown = Some(self.redirector.mount());
    }

    pub(crate) fn stop_countdown(&self) {
        let countdown = self.lock().countdown.take();
        drop(countdown);
    }

    pub(crate) fn countdown_remaining(&self) -> Option<u32> {
        self.lock().countdown.as_ref().map(CountdownHandle::remaining)
    }

    pub(crate) fn subscribe_countdown(&self) -> Option<watch::Receiver<u32>> {
        self.lock().countdown.as_ref().map(CountdownHandle::subscribe)
    }

    pub(crate) fn is_outlet_mounted(&self) -> bool {
        self.lock().outlet_mounted
    }

    /// Revoke liveness and remove everything this mount shows.
    pub(crate) fn teardown(&self) {
        self.liveness.revoke();
        let mut inner = self.lock();
        Self::unmount_locked(&mut inner, self.outlet.as_ref());
        inner.countdown = None;
    }

    fn unmount_locked(inner: &mut ViewInner, outlet: &dyn ProtectedOutlet) {
        if inner.outlet_mounted {
            inner.outlet_mounted = false;
            outlet.unmount();
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
