//! Bootstrap sequencer.
//!
//! Fires every catalog fetch at once on mount and flips the `booted` flag
//! after the last one settles, failed or not.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use sf_core::bootstrap::{AttemptStatus, BootstrapOutcome, BootstrapSource};
use sf_core::catalog::ProductQuery;
use sf_core::ports::{CatalogStorePort, StoreError};

use super::internal::{settle_all, Liveness, Settled};

pub struct BootstrapSequencer {
    store: Arc<dyn CatalogStorePort>,
    initial_products: ProductQuery,
}

impl BootstrapSequencer {
    pub fn new(store: Arc<dyn CatalogStorePort>, initial_products: ProductQuery) -> Self {
        Self {
            store,
            initial_products,
        }
    }

    /// Run every fetch concurrently and wait until all of them settled.
    ///
    /// Never fails: rejected fetches are logged and recorded in the outcome.
    pub async fn run(&self) -> BootstrapOutcome {
        let span = info_span!(
            "usecase.bootstrap.run",
            initial_limit = self.initial_products.limit,
            sort = %self.initial_products.sort
        );

        async {
            let store = self.store.as_ref();
            let tasks: Vec<(BootstrapSource, BoxFuture<'_, Result<(), StoreError>>)> = vec![
                (BootstrapSource::CategoryTree, store.load_category_tree()),
                (BootstrapSource::Subcategories, store.load_subcategories()),
                (BootstrapSource::SubSubcategories, store.load_sub_subcategories()),
                (BootstrapSource::Brands, store.load_brands()),
                (
                    BootstrapSource::InitialProducts,
                    store.load_products(&self.initial_products),
                ),
            ];

            let mut outcome = BootstrapOutcome::pending(&BootstrapSource::ALL);
            for Settled { key, result } in settle_all(tasks).await {
                match result {
                    Ok(()) => {
                        debug!(source = %key, "bootstrap fetch fulfilled");
                        outcome.settle(key, AttemptStatus::Fulfilled);
                    }
                    Err(err) => {
                        warn!(source = %key, error = %err, "bootstrap fetch rejected");
                        outcome.settle(
                            key,
                            AttemptStatus::Rejected {
                                reason: err.to_string(),
                            },
                        );
                    }
                }
            }

            info!(
                fulfilled = outcome.fulfilled().count(),
                rejected = outcome.rejected().count(),
                "bootstrap settled"
            );
            outcome
        }
        .instrument(span)
        .await
    }

    /// Start the sequence for one application mount.
    ///
    /// The returned host owns the readiness flag. Dropping it before the
    /// fetches settle suppresses the readiness update.
    pub fn mount(self: &Arc<Self>) -> BootstrapHost {
        let (booted_tx, booted_rx) = watch::channel(false);
        let (outcome_tx, outcome_rx) = watch::channel(None);
        let liveness = Liveness::new();

        let sequencer = Arc::clone(self);
        let task_liveness = liveness.clone();
        let task = tokio::spawn(async move {
            let outcome = sequencer.run().await;
            if !task_liveness.is_alive() {
                debug!("bootstrap host unmounted before settling, readiness dropped");
                return;
            }
            outcome_tx.send_replace(Some(outcome));
            booted_tx.send_replace(true);
        });

        BootstrapHost {
            booted: booted_rx,
            outcome: outcome_rx,
            liveness,
            task,
        }
    }
}

/// One mount of the bootstrap sequence.
pub struct BootstrapHost {
    booted: watch::Receiver<bool>,
    outcome: watch::Receiver<Option<BootstrapOutcome>>,
    liveness: Liveness,
    task: JoinHandle<()>,
}

impl BootstrapHost {
    /// Whether the main UI may render.
    pub fn is_booted(&self) -> bool {
        *self.booted.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.booted.clone()
    }

    /// Per-source outcome, available once booted.
    pub fn outcome(&self) -> Option<BootstrapOutcome> {
        self.outcome.borrow().clone()
    }

    /// Wait for readiness. Returns `false` if the sequence can no longer
    /// complete.
    pub async fn wait_booted(&mut self) -> bool {
        self.booted.wait_for(|booted| *booted).await.is_ok()
    }

    pub fn unmount(self) {}
}

impl Drop for BootstrapHost {
    fn drop(&mut self) {
        self.liveness.revoke();
        self.task.abort();
    }
}
