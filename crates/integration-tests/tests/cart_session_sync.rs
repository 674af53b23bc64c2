//! Integration tests for cart persistence through `CartSession`.
//!
//! Signed-in customers round-trip every mutation through the cart store and
//! replace local state with the store's response; anonymous visitors mutate
//! locally and write a backup copy. Either way a failed remote call must
//! leave the local cart — and every total derived from it — untouched.

use std::sync::Arc;

use kade_checkout::{
    Backends, CartOwner, CartSession, CheckoutError, LineKey, PricingStage,
};
use kade_core::{AccountType, CustomerId, Money, ProductId, ShippingSelection, VariationId};
use kade_integration_tests::{
    FailingBackup, FailingCartStore, InMemoryCartStore, RecordingBackup, RecordingGateway,
    fixture_catalog, init_tracing, leather_sandals, spice_box,
};

fn customer() -> CartOwner {
    CartOwner::customer(CustomerId::new(7))
}

#[tokio::test]
async fn authenticated_mutations_round_trip_the_store() {
    init_tracing();
    let store = Arc::new(InMemoryCartStore::default());
    let backends = Backends {
        catalog: Arc::new(fixture_catalog()),
        store: store.clone(),
        backup: Arc::new(RecordingBackup::default()),
        orders: Arc::new(RecordingGateway::default()),
    };
    let mut session = CartSession::new(backends, customer(), AccountType::Personal);

    session
        .add_item(spice_box().id, None, 2, None)
        .await
        .expect("add should succeed");

    assert_eq!(store.save_count(), 1);
    let saved = store.saved_cart(&customer()).expect("cart should be saved");
    assert_eq!(saved.item_count(), session.cart().item_count());
    assert_eq!(saved.subtotal(), session.cart().subtotal());
}

#[tokio::test]
async fn failed_save_leaves_cart_and_totals_unchanged() {
    init_tracing();
    let backends = Backends {
        catalog: Arc::new(fixture_catalog()),
        store: Arc::new(FailingCartStore),
        backup: Arc::new(RecordingBackup::default()),
        orders: Arc::new(RecordingGateway::default()),
    };
    let mut session = CartSession::new(backends, customer(), AccountType::Personal);

    let err = session
        .add_item(spice_box().id, None, 2, None)
        .await
        .expect_err("save should fail");

    assert!(matches!(
        err,
        CheckoutError::CartSync {
            operation: "add_item",
            ..
        }
    ));
    assert!(session.cart().is_empty());

    // Displayed totals still match the (unchanged) cart state.
    let totals = session.totals(
        &ShippingSelection::delivery("Kandy"),
        PricingStage::CartSummary,
    );
    assert!(totals.subtotal.is_zero());
}

#[tokio::test]
async fn load_pulls_the_saved_cart() {
    init_tracing();
    let mut seeded = kade_checkout::Cart::new();
    seeded.add_item(&spice_box(), None, 1, None);
    let store = Arc::new(InMemoryCartStore::with_cart(customer(), seeded));
    let backends = Backends {
        catalog: Arc::new(fixture_catalog()),
        store,
        backup: Arc::new(RecordingBackup::default()),
        orders: Arc::new(RecordingGateway::default()),
    };
    let mut session = CartSession::new(backends, customer(), AccountType::Personal);

    session.load().await.expect("load should succeed");

    assert_eq!(session.cart().item_count(), 1);
    assert_eq!(session.cart().subtotal(), Money::rupees(1500));
}

#[tokio::test]
async fn load_failure_keeps_local_state() {
    init_tracing();
    let backends = Backends {
        catalog: Arc::new(fixture_catalog()),
        store: Arc::new(FailingCartStore),
        backup: Arc::new(RecordingBackup::default()),
        orders: Arc::new(RecordingGateway::default()),
    };
    let mut session = CartSession::new(backends, customer(), AccountType::Personal);

    let err = session.load().await.expect_err("load should fail");
    assert!(matches!(
        err,
        CheckoutError::CartSync {
            operation: "load",
            ..
        }
    ));
    assert!(session.cart().is_empty());
}

#[tokio::test]
async fn anonymous_mutations_write_a_backup_copy() {
    init_tracing();
    let backup = Arc::new(RecordingBackup::default());
    let backends = Backends {
        catalog: Arc::new(fixture_catalog()),
        store: Arc::new(InMemoryCartStore::default()),
        backup: backup.clone(),
        orders: Arc::new(RecordingGateway::default()),
    };
    let mut session = CartSession::new(backends, CartOwner::anonymous(), AccountType::Personal);

    let outcome = session
        .add_item(spice_box().id, None, 1, None)
        .await
        .expect("add should succeed");
    session
        .update_quantity(outcome.key, 2)
        .await
        .expect("update should succeed");

    assert_eq!(backup.persist_count(), 2);
    let copy = backup.last().expect("backup copy exists");
    assert_eq!(copy.item_count(), 2);
    assert_eq!(copy.subtotal(), session.cart().subtotal());
}

#[tokio::test]
async fn backup_failure_does_not_fail_the_mutation() {
    init_tracing();
    let backends = Backends {
        catalog: Arc::new(fixture_catalog()),
        store: Arc::new(InMemoryCartStore::default()),
        backup: Arc::new(FailingBackup),
        orders: Arc::new(RecordingGateway::default()),
    };
    let mut session = CartSession::new(backends, CartOwner::anonymous(), AccountType::Personal);

    session
        .add_item(spice_box().id, None, 1, None)
        .await
        .expect("backup failure is best-effort");

    assert_eq!(session.cart().item_count(), 1);
}

#[tokio::test]
async fn update_and_remove_keep_the_store_in_step() {
    init_tracing();
    let store = Arc::new(InMemoryCartStore::default());
    let backends = Backends {
        catalog: Arc::new(fixture_catalog()),
        store: store.clone(),
        backup: Arc::new(RecordingBackup::default()),
        orders: Arc::new(RecordingGateway::default()),
    };
    let mut session = CartSession::new(backends, customer(), AccountType::Personal);

    let outcome = session
        .add_item(leather_sandals().id, Some(VariationId::new(11)), 1, None)
        .await
        .expect("add should succeed");
    session
        .update_quantity(outcome.key, 3)
        .await
        .expect("update should succeed")
        .expect("line exists");

    let saved = store.saved_cart(&customer()).expect("cart saved");
    assert_eq!(saved.item_count(), 3);

    assert!(session
        .remove_line(outcome.key)
        .await
        .expect("remove should succeed"));
    let saved = store.saved_cart(&customer()).expect("cart saved");
    assert!(saved.is_empty());
    assert!(session.cart().is_empty());
}

#[tokio::test]
async fn unknown_product_surfaces_catalog_error() {
    init_tracing();
    let backends = Backends {
        catalog: Arc::new(fixture_catalog()),
        store: Arc::new(InMemoryCartStore::default()),
        backup: Arc::new(RecordingBackup::default()),
        orders: Arc::new(RecordingGateway::default()),
    };
    let mut session = CartSession::new(backends, CartOwner::anonymous(), AccountType::Personal);

    let err = session
        .add_item(ProductId::new(404), None, 1, None)
        .await
        .expect_err("lookup should fail");

    assert!(matches!(err, CheckoutError::Catalog { .. }));
    assert!(session.cart().is_empty());
}

#[tokio::test]
async fn unknown_variation_is_rejected_before_the_cart_changes() {
    init_tracing();
    let backends = Backends {
        catalog: Arc::new(fixture_catalog()),
        store: Arc::new(InMemoryCartStore::default()),
        backup: Arc::new(RecordingBackup::default()),
        orders: Arc::new(RecordingGateway::default()),
    };
    let mut session = CartSession::new(backends, CartOwner::anonymous(), AccountType::Personal);

    let err = session
        .add_item(leather_sandals().id, Some(VariationId::new(99)), 1, None)
        .await
        .expect_err("variation should be rejected");

    assert!(matches!(err, CheckoutError::VariationNotFound { .. }));
    assert!(session.cart().is_empty());
}

#[tokio::test]
async fn noop_mutations_skip_the_store() {
    init_tracing();
    let store = Arc::new(InMemoryCartStore::default());
    let backends = Backends {
        catalog: Arc::new(fixture_catalog()),
        store: store.clone(),
        backup: Arc::new(RecordingBackup::default()),
        orders: Arc::new(RecordingGateway::default()),
    };
    let mut session = CartSession::new(backends, customer(), AccountType::Personal);

    session
        .add_item(spice_box().id, None, 2, None)
        .await
        .expect("add should succeed");
    assert_eq!(store.save_count(), 1);

    // Same quantity again: nothing changes, nothing is saved.
    session
        .update_quantity(
            LineKey {
                product: spice_box().id,
                customized: false,
            },
            2,
        )
        .await
        .expect("update should succeed");
    assert_eq!(store.save_count(), 1);

    // Removing a line that is not there does not touch the store either.
    let removed = session
        .remove_line(LineKey {
            product: ProductId::new(404),
            customized: false,
        })
        .await
        .expect("remove should succeed");
    assert!(!removed);
    assert_eq!(store.save_count(), 1);
}
