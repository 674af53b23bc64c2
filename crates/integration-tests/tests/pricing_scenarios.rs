//! End-to-end pricing scenarios.
//!
//! Each test drives a real `CartSession` over the in-memory fakes and
//! checks the totals the storefront screens would display.

use std::sync::Arc;

use kade_checkout::{
    Backends, CartOwner, CartSession, PricingStage,
};
use kade_core::{AccountType, Money, PickupLocationId, Product, ProductId, ShippingSelection};
use kade_integration_tests::{
    InMemoryCartStore, InMemoryCatalog, RecordingBackup, RecordingGateway, fixture_catalog,
    init_tracing, spice_box,
};

fn session_over(catalog: InMemoryCatalog, account: AccountType) -> CartSession {
    init_tracing();
    let backends = Backends {
        catalog: Arc::new(catalog),
        store: Arc::new(InMemoryCartStore::default()),
        backup: Arc::new(RecordingBackup::default()),
        orders: Arc::new(RecordingGateway::default()),
    };
    CartSession::new(backends, CartOwner::anonymous(), account)
}

/// Bulk wholesale product with round numbers: 4 units make a 10000 rupee
/// subtotal and a 500 rupee customization total.
fn bulk_rice_pack() -> Product {
    Product {
        id: ProductId::new(9),
        name: "Bulk rice pack".to_string(),
        base_price: Money::rupees(2500),
        customization_fee: Some(Money::rupees(125)),
        stock: 10,
        variations: vec![],
    }
}

#[tokio::test]
async fn personal_delivery_pays_flat_rate_despite_cheap_zone() {
    // Mullaitivu sits in the 250-rupee zone, but Personal deliveries pay
    // the island-wide flat 500.
    let mut session = session_over(fixture_catalog(), AccountType::Personal);
    session
        .add_item(spice_box().id, None, 2, None)
        .await
        .expect("add should succeed");

    let totals = session.totals(
        &ShippingSelection::delivery("Mullaitivu"),
        PricingStage::CheckoutReview,
    );

    assert_eq!(totals.subtotal, Money::rupees(3000));
    assert_eq!(totals.shipping_fee, Money::rupees(500));
    assert!(totals.discount.is_zero());
    assert_eq!(totals.total, Money::rupees(3500));
}

#[tokio::test]
async fn business_review_discount_covers_shipping() {
    let product = bulk_rice_pack();
    let mut session = session_over(
        InMemoryCatalog::with_products([product.clone()]),
        AccountType::Business,
    );
    session
        .add_item(product.id, None, 4, Some("branded packing".to_string()))
        .await
        .expect("add should succeed");

    let totals = session.totals(
        &ShippingSelection::delivery("Colombo"),
        PricingStage::CheckoutReview,
    );

    // base = 10000 + 500 + 500 = 11000; 10% off; total 9900.
    assert_eq!(totals.subtotal, Money::rupees(10_000));
    assert_eq!(totals.customization_total, Money::rupees(500));
    assert_eq!(totals.shipping_fee, Money::rupees(500));
    assert_eq!(totals.discount, Money::rupees(1100));
    assert_eq!(totals.total, Money::rupees(9900));
}

#[tokio::test]
async fn pickup_is_always_free_shipping() {
    for account in [AccountType::Personal, AccountType::Business] {
        let mut session = session_over(fixture_catalog(), account);
        session
            .add_item(spice_box().id, None, 1, None)
            .await
            .expect("add should succeed");

        for stage in [PricingStage::CartSummary, PricingStage::CheckoutReview] {
            let totals = session.totals(
                &ShippingSelection::pickup(PickupLocationId::new(4)),
                stage,
            );
            assert!(totals.shipping_fee.is_zero());
        }
    }
}

#[tokio::test]
async fn stock_clamp_notifies_caller() {
    // Spice box has two units in stock; asking for three lands two.
    let mut session = session_over(fixture_catalog(), AccountType::Personal);
    let outcome = session
        .add_item(spice_box().id, None, 3, None)
        .await
        .expect("add should succeed");

    assert_eq!(outcome.added, 2);
    assert!(outcome.adjusted);
    assert_eq!(session.cart().item_count(), 2);
}

#[tokio::test]
async fn cart_and_review_totals_disagree_for_business() {
    // The cart page runs a 5% merchandise promotion, checkout review a 10%
    // shipping-inclusive one. The mismatch is the storefront's documented
    // behavior; both screens must show exactly what their own rule says.
    let product = bulk_rice_pack();
    let mut session = session_over(
        InMemoryCatalog::with_products([product.clone()]),
        AccountType::Business,
    );
    session
        .add_item(product.id, None, 4, None)
        .await
        .expect("add should succeed");

    let shipping = ShippingSelection::delivery("Colombo");
    let cart_page = session.totals(&shipping, PricingStage::CartSummary);
    let review = session.totals(&shipping, PricingStage::CheckoutReview);

    assert_eq!(cart_page.discount, Money::rupees(500)); // 5% of 10000
    assert_eq!(cart_page.total, Money::rupees(10_000)); // 9500 + 500 shipping
    assert_eq!(review.discount, Money::rupees(1050)); // 10% of 10500
    assert_eq!(review.total, Money::rupees(9450));
    assert_ne!(cart_page.total, review.total);
}

#[tokio::test]
async fn missing_district_falls_back_to_default_fee() {
    let mut session = session_over(fixture_catalog(), AccountType::Business);
    session
        .add_item(spice_box().id, None, 1, None)
        .await
        .expect("add should succeed");

    let totals = session.totals(
        &ShippingSelection::delivery(""),
        PricingStage::CartSummary,
    );
    assert_eq!(totals.shipping_fee, Money::rupees(350));
}

#[tokio::test]
async fn unknown_district_still_flat_for_personal() {
    let mut session = session_over(fixture_catalog(), AccountType::Personal);
    session
        .add_item(spice_box().id, None, 1, None)
        .await
        .expect("add should succeed");

    let totals = session.totals(
        &ShippingSelection::delivery("Atlantis"),
        PricingStage::CheckoutReview,
    );
    assert_eq!(totals.shipping_fee, Money::rupees(500));
}

#[tokio::test]
async fn totals_are_stable_across_recomputes() {
    let mut session = session_over(fixture_catalog(), AccountType::Business);
    session
        .add_item(spice_box().id, None, 2, None)
        .await
        .expect("add should succeed");

    let shipping = ShippingSelection::delivery("Galle");
    let first = session.totals(&shipping, PricingStage::CheckoutReview);
    let second = session.totals(&shipping, PricingStage::CheckoutReview);

    assert_eq!(first, second);
}
