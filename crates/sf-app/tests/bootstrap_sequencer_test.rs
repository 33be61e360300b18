mod common;

use std::sync::Arc;

use common::{fetch_failure, settle_tasks, GatedCatalogStore, Releases};
use sf_app::BootstrapSequencer;
use sf_core::bootstrap::{AttemptStatus, BootstrapSource};
use sf_core::catalog::{ProductQuery, SortDirection, SortField};
use sf_core::ports::CatalogStorePort;

fn sequencer(store: &Arc<GatedCatalogStore>) -> Arc<BootstrapSequencer> {
    Arc::new(BootstrapSequencer::new(
        store.clone() as Arc<dyn CatalogStorePort>,
        ProductQuery::new(12, SortField::CreatedAt, SortDirection::Desc),
    ))
}

fn release(releases: &mut Releases, source: BootstrapSource, ok: bool) {
    let tx = releases.remove(&source).expect("source released twice");
    let result = if ok {
        Ok(())
    } else {
        Err(fetch_failure(source.as_str()))
    };
    let _ = tx.send(result);
}

#[tokio::test]
async fn all_fetches_start_concurrently_before_any_settles() {
    let (store, _releases) = GatedCatalogStore::new();
    let host = sequencer(&store).mount();

    settle_tasks().await;

    let mut started = store.started();
    started.sort_by_key(|s| s.as_str());
    let mut expected = BootstrapSource::ALL.to_vec();
    expected.sort_by_key(|s| s.as_str());
    assert_eq!(started, expected, "every fetch should be in flight at once");
    assert!(!host.is_booted());
}

#[tokio::test]
async fn readiness_flips_once_only_after_every_attempt_settles() {
    // A handful of completion orders with mixed outcomes.
    let orders: [[(BootstrapSource, bool); 5]; 3] = [
        [
            (BootstrapSource::Brands, true),
            (BootstrapSource::CategoryTree, false),
            (BootstrapSource::InitialProducts, true),
            (BootstrapSource::SubSubcategories, false),
            (BootstrapSource::Subcategories, true),
        ],
        [
            (BootstrapSource::InitialProducts, false),
            (BootstrapSource::Subcategories, false),
            (BootstrapSource::Brands, false),
            (BootstrapSource::CategoryTree, false),
            (BootstrapSource::SubSubcategories, false),
        ],
        [
            (BootstrapSource::SubSubcategories, true),
            (BootstrapSource::Subcategories, true),
            (BootstrapSource::CategoryTree, true),
            (BootstrapSource::Brands, true),
            (BootstrapSource::InitialProducts, true),
        ],
    ];

    for order in orders {
        let (store, mut releases) = GatedCatalogStore::new();
        let host = sequencer(&store).mount();
        let mut booted = host.subscribe();
        settle_tasks().await;

        for (index, (source, ok)) in order.iter().enumerate() {
            assert!(
                !host.is_booted(),
                "booted before attempt {index} ({source}) settled"
            );
            release(&mut releases, *source, *ok);
            settle_tasks().await;
        }

        assert!(host.is_booted());
        assert!(*booted.borrow_and_update());
        settle_tasks().await;
        assert!(
            !booted.has_changed().unwrap_or(false),
            "readiness must transition exactly once"
        );

        let outcome = host.outcome().expect("outcome recorded on boot");
        assert!(outcome.is_complete());
        let expected_failures = order.iter().filter(|(_, ok)| !ok).count();
        assert_eq!(outcome.rejected().count(), expected_failures);
    }
}

#[tokio::test]
async fn single_rejection_does_not_block_readiness() {
    let (store, mut releases) = GatedCatalogStore::new();
    let mut host = sequencer(&store).mount();
    settle_tasks().await;

    release(&mut releases, BootstrapSource::CategoryTree, true);
    release(&mut releases, BootstrapSource::Subcategories, true);
    release(&mut releases, BootstrapSource::SubSubcategories, true);
    release(&mut releases, BootstrapSource::Brands, false);
    release(&mut releases, BootstrapSource::InitialProducts, true);

    assert!(host.wait_booted().await);
    let outcome = host.outcome().unwrap();
    assert_eq!(outcome.fulfilled().count(), 4);
    let rejected: Vec<_> = outcome.rejected().map(|(source, _)| source).collect();
    assert_eq!(rejected, vec![BootstrapSource::Brands]);
    assert!(matches!(
        outcome
            .attempts()
            .iter()
            .find(|a| a.source == BootstrapSource::Brands)
            .map(|a| &a.status),
        Some(AttemptStatus::Rejected { .. })
    ));
}

#[tokio::test]
async fn initial_product_page_uses_configured_query() {
    let (store, mut releases) = GatedCatalogStore::new();
    let sequencer = Arc::new(BootstrapSequencer::new(
        store.clone() as Arc<dyn CatalogStorePort>,
        ProductQuery::new(24, SortField::Price, SortDirection::Asc),
    ));

    for source in BootstrapSource::ALL {
        release(&mut releases, source, true);
    }
    let outcome = sequencer.run().await;

    assert!(outcome.is_complete());
    assert_eq!(
        store.product_queries.lock().unwrap().as_slice(),
        [ProductQuery::new(24, SortField::Price, SortDirection::Asc)]
    );
}

#[tokio::test]
async fn unmount_before_settling_suppresses_readiness() {
    let (store, mut releases) = GatedCatalogStore::new();
    let host = sequencer(&store).mount();
    let booted = host.subscribe();
    settle_tasks().await;

    release(&mut releases, BootstrapSource::CategoryTree, true);
    settle_tasks().await;
    host.unmount();

    for source in BootstrapSource::ALL {
        if releases.contains_key(&source) {
            release(&mut releases, source, true);
        }
    }
    settle_tasks().await;

    assert!(!*booted.borrow(), "no readiness update after unmount");
    assert!(!booted.has_changed().unwrap_or(false));
}
