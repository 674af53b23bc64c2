//! The cart session controller.
//!
//! One [`CartSession`] exists per visitor and it is the only writer to that
//! visitor's cart: every screen mutates through the session's operations and
//! re-renders from the aggregates it exposes. There is no process-wide cart.
//!
//! Remote-backed mutation follows one shape: mutate a scratch copy, send it
//! to the cart store, replace local state with the store's response. A
//! failed call leaves the local cart — and therefore every displayed total —
//! exactly as it was. Store round-trips are tagged with a monotonic
//! sequence, and a response that lost the race against a newer one is
//! dropped rather than applied.
//!
//! Anonymous visitors skip the store: their mutations apply locally and a
//! backup copy goes to the [`CartBackup`] sink after every successful
//! recompute, best-effort.

use std::sync::Arc;

use chrono::Utc;
use kade_core::{AccountType, ProductId, ShippingSelection, VariationId};
use tracing::{debug, error, info, instrument, warn};

use crate::cart::{AddOutcome, Cart, LineKey, QuantityOutcome};
use crate::discount::PricingStage;
use crate::error::CheckoutError;
use crate::gateway::{CartBackup, CartOwner, CartStore, OrderGateway, ProductCatalog};
use crate::order::{BillingDetails, OrderConfirmation, OrderLine, OrderPayload, PaymentMethod};
use crate::totals::{OrderTotals, order_totals};
use crate::zones::ZoneTable;

/// Monotonic sequence for store round-trips.
///
/// Every outgoing request takes a tag; a response commits only if its tag is
/// newer than the last applied one. Last-write-wins is decided by request
/// order, not arrival order, so a stale response can never overwrite fresher
/// state.
#[derive(Debug, Default)]
pub struct SyncCursor {
    issued: u64,
    applied: u64,
}

impl SyncCursor {
    /// Tag the next outgoing request.
    #[must_use]
    pub const fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Whether a response with this tag may be applied; records the tag as
    /// applied if so.
    pub const fn try_commit(&mut self, seq: u64) -> bool {
        if seq > self.applied {
            self.applied = seq;
            true
        } else {
            false
        }
    }
}

/// The backend collaborators a session talks to.
#[derive(Clone)]
pub struct Backends {
    /// Product lookups (usually wrapped in a [`crate::CachedCatalog`]).
    pub catalog: Arc<dyn ProductCatalog>,
    /// Cart persistence for signed-in customers.
    pub store: Arc<dyn CartStore>,
    /// Backup sink for anonymous carts.
    pub backup: Arc<dyn CartBackup>,
    /// Order submission.
    pub orders: Arc<dyn OrderGateway>,
}

/// The single controller that owns a visitor's cart.
///
/// Mutating methods take `&mut self`, which serializes same-session
/// mutations: a second mutation cannot start while one is in flight.
pub struct CartSession {
    backends: Backends,
    zones: ZoneTable,
    owner: CartOwner,
    account: AccountType,
    cart: Cart,
    cursor: SyncCursor,
}

impl CartSession {
    /// A fresh session with an empty cart and the built-in zone table.
    #[must_use]
    pub fn new(backends: Backends, owner: CartOwner, account: AccountType) -> Self {
        Self {
            backends,
            zones: ZoneTable::default(),
            owner,
            account,
            cart: Cart::new(),
            cursor: SyncCursor::default(),
        }
    }

    /// Use a bespoke zone table instead of the built-in one.
    #[must_use]
    pub fn with_zone_table(mut self, zones: ZoneTable) -> Self {
        self.zones = zones;
        self
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Who this session belongs to.
    #[must_use]
    pub const fn owner(&self) -> &CartOwner {
        &self.owner
    }

    /// The account classification pricing runs under.
    #[must_use]
    pub const fn account(&self) -> AccountType {
        self.account
    }

    /// Pull the signed-in customer's saved cart from the store.
    ///
    /// Anonymous sessions have nothing to load and return immediately; use
    /// [`CartSession::restore`] to seed a guest cart from a backup copy.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::CartSync`] when the store cannot be
    /// reached; the local cart is left as it was.
    #[instrument(skip(self), fields(owner = %self.owner))]
    pub async fn load(&mut self) -> Result<(), CheckoutError> {
        if !self.owner.is_authenticated() {
            debug!("Anonymous session, nothing to load");
            return Ok(());
        }
        let seq = self.cursor.issue();
        match self.backends.store.load(&self.owner).await {
            Ok(Some(cart)) => {
                if self.cursor.try_commit(seq) {
                    info!(items = cart.item_count(), "Cart loaded");
                    self.cart = cart;
                } else {
                    warn!(seq, "Dropping stale cart load response");
                }
                Ok(())
            }
            Ok(None) => {
                debug!("No saved cart");
                Ok(())
            }
            Err(source) => {
                error!(error = %source, "Cart load failed");
                Err(CheckoutError::CartSync {
                    operation: "load",
                    source,
                })
            }
        }
    }

    /// Seed the cart from a copy the embedder restored (anonymous sessions
    /// keep one in browser local storage).
    pub fn restore(&mut self, cart: Cart) {
        info!(owner = %self.owner, items = cart.item_count(), "Cart restored from backup");
        self.cart = cart;
    }

    /// Add units of a product to the cart.
    ///
    /// Fetches the product for fresh pricing and stock, applies the
    /// aggregator's clamping rules, and persists the result. The outcome
    /// reports how many units actually landed so the UI can show a
    /// "quantity adjusted" notice.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Catalog`] when the product cannot be
    /// fetched, [`CheckoutError::VariationNotFound`] when the selected
    /// variation is not on the product, or [`CheckoutError::CartSync`] when
    /// persisting fails. On any error the cart is unchanged.
    #[instrument(skip(self, note), fields(owner = %self.owner, product = %product, quantity))]
    pub async fn add_item(
        &mut self,
        product: ProductId,
        variation: Option<VariationId>,
        quantity: u32,
        note: Option<String>,
    ) -> Result<AddOutcome, CheckoutError> {
        let fetched = self
            .backends
            .catalog
            .product(product)
            .await
            .map_err(|source| {
                error!(error = %source, "Catalog lookup failed");
                CheckoutError::Catalog { product, source }
            })?;
        let selected = match variation {
            Some(id) => Some(fetched.variation(id).ok_or(
                CheckoutError::VariationNotFound {
                    product,
                    variation: id,
                },
            )?),
            None => None,
        };

        let key = LineKey {
            product,
            customized: note.is_some(),
        };
        let before = self.cart.line(key).map_or(0, |line| line.quantity);
        let mut scratch = self.cart.clone();
        let outcome = scratch.add_item(&fetched, selected, quantity, note);
        if outcome.adjusted {
            warn!(
                requested = outcome.requested,
                added = outcome.added,
                "Quantity adjusted to available stock"
            );
        }
        if outcome.line_quantity == before {
            debug!("Nothing to add, cart unchanged");
            return Ok(outcome);
        }

        self.sync(scratch, "add_item").await?;
        Ok(outcome)
    }

    /// Set a line's quantity, clamped to `[1, capacity]`.
    ///
    /// Returns `Ok(None)` when no line matches the key. A request below 1
    /// leaves the line untouched — removal is [`CartSession::remove_line`].
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::CartSync`] when persisting fails; the cart
    /// is unchanged.
    #[instrument(skip(self), fields(owner = %self.owner, line = %key, quantity))]
    pub async fn update_quantity(
        &mut self,
        key: LineKey,
        quantity: u32,
    ) -> Result<Option<QuantityOutcome>, CheckoutError> {
        let mut scratch = self.cart.clone();
        let Some(outcome) = scratch.update_quantity(key, quantity) else {
            debug!("No such line in cart");
            return Ok(None);
        };
        if outcome.adjusted {
            warn!(
                requested = quantity,
                applied = outcome.quantity,
                "Quantity adjusted"
            );
        }
        if self.cart.line(key).map_or(0, |line| line.quantity) == outcome.quantity {
            debug!("Quantity unchanged, skipping save");
            return Ok(Some(outcome));
        }

        self.sync(scratch, "update_quantity").await?;
        Ok(Some(outcome))
    }

    /// Remove the line with the given key. Returns whether a line was
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::CartSync`] when persisting fails; the cart
    /// is unchanged.
    #[instrument(skip(self), fields(owner = %self.owner, line = %key))]
    pub async fn remove_line(&mut self, key: LineKey) -> Result<bool, CheckoutError> {
        let mut scratch = self.cart.clone();
        if !scratch.remove_line(key) {
            debug!("No such line in cart");
            return Ok(false);
        }

        self.sync(scratch, "remove_line").await?;
        Ok(true)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::CartSync`] when persisting fails; the cart
    /// is unchanged.
    #[instrument(skip(self), fields(owner = %self.owner))]
    pub async fn clear(&mut self) -> Result<(), CheckoutError> {
        if self.cart.is_empty() {
            return Ok(());
        }
        let mut scratch = self.cart.clone();
        scratch.clear();
        self.sync(scratch, "clear").await
    }

    /// Price the current cart for a screen.
    ///
    /// Pure: no remote calls, no cart mutation. Render paths call this
    /// freely — the cart page with [`PricingStage::CartSummary`], the
    /// review step with [`PricingStage::CheckoutReview`].
    #[must_use]
    pub fn totals(&self, shipping: &ShippingSelection, stage: PricingStage) -> OrderTotals {
        order_totals(&self.zones, &self.cart, self.account, shipping, stage)
    }

    /// Submit the order.
    ///
    /// Totals are recomputed here, at the checkout-review stage, and
    /// embedded in the payload — never accepted stale from a screen. The
    /// cart is cleared only after the gateway accepts; a failed clear after
    /// acceptance is logged but does not fail the placed order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Submission`] when the gateway refuses the
    /// order or cannot be reached; the cart is kept.
    #[instrument(skip(self, billing), fields(owner = %self.owner))]
    pub async fn place_order(
        &mut self,
        shipping: ShippingSelection,
        billing: BillingDetails,
        payment: PaymentMethod,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let totals = self.totals(&shipping, PricingStage::CheckoutReview);
        let payload = OrderPayload {
            owner: self.owner,
            account: self.account,
            lines: self.cart.lines().iter().map(OrderLine::from).collect(),
            shipping,
            billing,
            payment,
            totals,
            placed_at: Utc::now(),
        };

        let confirmation = self
            .backends
            .orders
            .place_order(&payload)
            .await
            .map_err(|source| {
                error!(error = %source, "Order submission failed");
                CheckoutError::Submission { source }
            })?;
        info!(order = %confirmation.order_id, total = %totals.total, "Order placed");

        // The order is in; a failed cart clear must not read as a failed
        // order.
        let mut cleared = self.cart.clone();
        cleared.clear();
        if let Err(err) = self.sync(cleared, "clear").await {
            warn!(error = %err, "Cart clear after order placement failed");
        }

        Ok(confirmation)
    }

    /// Persist a mutated cart and replace local state with the stored copy.
    async fn sync(&mut self, cart: Cart, operation: &'static str) -> Result<(), CheckoutError> {
        if self.owner.is_authenticated() {
            let seq = self.cursor.issue();
            let stored = self
                .backends
                .store
                .save(&self.owner, &cart)
                .await
                .map_err(|source| {
                    error!(error = %source, operation, "Cart save failed, keeping local state");
                    CheckoutError::CartSync { operation, source }
                })?;
            if self.cursor.try_commit(seq) {
                self.cart = stored;
            } else {
                warn!(seq, operation, "Dropping stale cart save response");
            }
        } else {
            self.cart = cart;
            if let Err(err) = self.backends.backup.persist(&self.cart).await {
                warn!(error = %err, operation, "Cart backup write failed");
            }
        }
        Ok(())
    }
}
