//! Integration-test support for Kade.
//!
//! In-memory implementations of the checkout gateway traits, plus the
//! catalog fixtures the scenario tests share. The fakes are deliberately
//! small: a `HashMap` catalog, a `HashMap` cart store that hands back the
//! stored copy the way the real backend does, a recording order gateway,
//! and failing variants for the error paths.
//!
//! # Running tests
//!
//! ```bash
//! cargo test -p kade-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

use async_trait::async_trait;
use kade_checkout::{
    Cart, CartBackup, CartOwner, CartStore, GatewayError, OrderConfirmation, OrderGateway,
    OrderPayload, ProductCatalog,
};
use kade_core::{Money, OrderId, Product, ProductId, Variation, VariationId};

static TRACING: Once = Once::new();

/// Initialise a test subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `info`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}

// =============================================================================
// Catalog fixtures
// =============================================================================

/// Sandals in two sizes, customizable (embossed initials).
#[must_use]
pub fn leather_sandals() -> Product {
    Product {
        id: ProductId::new(1),
        name: "Leather sandals".to_string(),
        base_price: Money::rupees(3400),
        customization_fee: Some(Money::rupees(450)),
        stock: 10,
        variations: vec![
            Variation {
                id: VariationId::new(11),
                label: "EU 40".to_string(),
                price_delta: Money::rupees(0),
                stock: 6,
            },
            Variation {
                id: VariationId::new(12),
                label: "EU 44".to_string(),
                price_delta: Money::rupees(250),
                stock: 3,
            },
        ],
    }
}

/// A plain product with only two units in stock.
#[must_use]
pub fn spice_box() -> Product {
    Product {
        id: ProductId::new(2),
        name: "Spice box".to_string(),
        base_price: Money::rupees(1500),
        customization_fee: None,
        stock: 2,
        variations: vec![],
    }
}

/// Deep stock, cheap, customizable — exercises the per-line hard cap.
#[must_use]
pub fn clay_lamp() -> Product {
    Product {
        id: ProductId::new(3),
        name: "Clay oil lamp".to_string(),
        base_price: Money::rupees(240),
        customization_fee: Some(Money::rupees(60)),
        stock: 30,
        variations: vec![],
    }
}

/// The standard three-product catalog the scenario tests share.
#[must_use]
pub fn fixture_catalog() -> InMemoryCatalog {
    InMemoryCatalog::with_products([leather_sandals(), spice_box(), clay_lamp()])
}

// =============================================================================
// Catalog fakes
// =============================================================================

/// `HashMap`-backed catalog that counts upstream lookups.
#[derive(Default)]
pub struct InMemoryCatalog {
    products: HashMap<ProductId, Product>,
    lookups: AtomicUsize,
}

impl InMemoryCatalog {
    /// A catalog holding the given products.
    #[must_use]
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    /// How many lookups reached this catalog.
    #[must_use]
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, GatewayError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.products
            .get(&id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("product {id}")))
    }
}

// =============================================================================
// Cart store fakes
// =============================================================================

/// `HashMap`-backed cart store. `save` hands back the stored copy, the way
/// the real backend responds with its authoritative view.
#[derive(Default)]
pub struct InMemoryCartStore {
    carts: Mutex<HashMap<CartOwner, Cart>>,
    saves: AtomicUsize,
}

impl InMemoryCartStore {
    /// A store pre-seeded with one owner's cart.
    #[must_use]
    pub fn with_cart(owner: CartOwner, cart: Cart) -> Self {
        let store = Self::default();
        store
            .carts
            .lock()
            .expect("cart store lock poisoned")
            .insert(owner, cart);
        store
    }

    /// How many saves the store has accepted.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// The stored cart for an owner, if any.
    #[must_use]
    pub fn saved_cart(&self, owner: &CartOwner) -> Option<Cart> {
        self.carts
            .lock()
            .expect("cart store lock poisoned")
            .get(owner)
            .cloned()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn load(&self, owner: &CartOwner) -> Result<Option<Cart>, GatewayError> {
        Ok(self
            .carts
            .lock()
            .expect("cart store lock poisoned")
            .get(owner)
            .cloned())
    }

    async fn save(&self, owner: &CartOwner, cart: &Cart) -> Result<Cart, GatewayError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let mut carts = self.carts.lock().expect("cart store lock poisoned");
        carts.insert(*owner, cart.clone());
        Ok(cart.clone())
    }
}

/// Store whose every call fails with a network error.
#[derive(Default)]
pub struct FailingCartStore;

#[async_trait]
impl CartStore for FailingCartStore {
    async fn load(&self, _owner: &CartOwner) -> Result<Option<Cart>, GatewayError> {
        Err(GatewayError::Network("connection reset".to_string()))
    }

    async fn save(&self, _owner: &CartOwner, _cart: &Cart) -> Result<Cart, GatewayError> {
        Err(GatewayError::Network("connection reset".to_string()))
    }
}

// =============================================================================
// Backup fakes
// =============================================================================

/// Backup sink that records every persisted copy.
#[derive(Default)]
pub struct RecordingBackup {
    copies: Mutex<Vec<Cart>>,
}

impl RecordingBackup {
    /// How many backup writes landed.
    #[must_use]
    pub fn persist_count(&self) -> usize {
        self.copies.lock().expect("backup lock poisoned").len()
    }

    /// The most recent backup copy.
    #[must_use]
    pub fn last(&self) -> Option<Cart> {
        self.copies
            .lock()
            .expect("backup lock poisoned")
            .last()
            .cloned()
    }
}

#[async_trait]
impl CartBackup for RecordingBackup {
    async fn persist(&self, cart: &Cart) -> Result<(), GatewayError> {
        self.copies
            .lock()
            .expect("backup lock poisoned")
            .push(cart.clone());
        Ok(())
    }
}

/// Backup sink that always fails.
#[derive(Default)]
pub struct FailingBackup;

#[async_trait]
impl CartBackup for FailingBackup {
    async fn persist(&self, _cart: &Cart) -> Result<(), GatewayError> {
        Err(GatewayError::Network("local storage unavailable".to_string()))
    }
}

// =============================================================================
// Order gateway fakes
// =============================================================================

/// Gateway that accepts every order and records the payloads.
pub struct RecordingGateway {
    payloads: Mutex<Vec<OrderPayload>>,
    next_id: AtomicI64,
}

impl Default for RecordingGateway {
    fn default() -> Self {
        Self {
            payloads: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1000),
        }
    }
}

impl RecordingGateway {
    /// Every payload the gateway has accepted, in order.
    #[must_use]
    pub fn payloads(&self) -> Vec<OrderPayload> {
        self.payloads.lock().expect("gateway lock poisoned").clone()
    }

    /// How many orders were placed.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.payloads.lock().expect("gateway lock poisoned").len()
    }
}

#[async_trait]
impl OrderGateway for RecordingGateway {
    async fn place_order(&self, payload: &OrderPayload) -> Result<OrderConfirmation, GatewayError> {
        self.payloads
            .lock()
            .expect("gateway lock poisoned")
            .push(payload.clone());
        Ok(OrderConfirmation {
            order_id: OrderId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
        })
    }
}

/// Gateway that refuses every order.
#[derive(Default)]
pub struct RejectingGateway;

#[async_trait]
impl OrderGateway for RejectingGateway {
    async fn place_order(
        &self,
        _payload: &OrderPayload,
    ) -> Result<OrderConfirmation, GatewayError> {
        Err(GatewayError::Rejected("payment declined".to_string()))
    }
}
