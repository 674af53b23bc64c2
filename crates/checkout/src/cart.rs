//! The cart and its aggregate bookkeeping.
//!
//! A [`Cart`] is an ordered collection of [`CartLine`]s plus derived
//! aggregates (item count, subtotal, customization total). The aggregates are
//! recomputed from scratch at the end of every mutating operation — never
//! incrementally patched — so they can never drift from the line collection.
//!
//! Lines are keyed by [`LineKey`]: the product plus whether the line carries
//! a customization. Adding the same product in the same customization state
//! merges into the existing line; a different customization state opens a new
//! line. Quantities are clamped to the available stock (and a hard per-line
//! cap), and the clamp is reported back so the UI can show a "quantity
//! adjusted" notice instead of silently shrinking the order.

use chrono::{DateTime, Utc};
use kade_core::{Money, Product, ProductId, Variation, VariationId};
use serde::{Deserialize, Serialize};

use crate::pricing::{PriceComponents, price_components};

/// Hard cap on the quantity of a single line, regardless of stock.
pub const MAX_LINE_QUANTITY: u32 = 10;

/// Identity of a cart line: one product in one customization state.
///
/// The variation is deliberately not part of the key — the storefront sells
/// one size per line and a re-add with a different size merges into the
/// existing line, keeping its frozen price components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    /// The product this line holds.
    pub product: ProductId,
    /// Whether the line carries a customization note.
    pub customized: bool,
}

impl std::fmt::Display for LineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.customized {
            write!(f, "{}+custom", self.product)
        } else {
            write!(f, "{}", self.product)
        }
    }
}

/// One distinct product+customization combination in the cart.
///
/// Price components are resolved when the line is first added and frozen
/// from then on; the effective unit price is always derived from them, never
/// stored pre-mixed. The capacity (stock clamped to the hard cap) is
/// refreshed whenever fresh catalog data passes through `add_item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line holds.
    pub product: ProductId,
    /// Product display name, snapshotted for cart rendering.
    pub name: String,
    /// Selected variation, if the product was added in a size.
    pub variation: Option<VariationId>,
    /// The selected variation's size label.
    pub variation_label: Option<String>,
    /// Customization note. Presence means the customization fee applies.
    pub note: Option<String>,
    /// Units of this line in the cart. Always in `[1, capacity]`.
    pub quantity: u32,
    /// Per-unit price breakdown, frozen at add time.
    pub components: PriceComponents,
    /// Most recently seen purchasable stock, capped at
    /// [`MAX_LINE_QUANTITY`].
    pub capacity: u32,
}

impl CartLine {
    /// The line's identity key.
    #[must_use]
    pub const fn key(&self) -> LineKey {
        LineKey {
            product: self.product,
            customized: self.note.is_some(),
        }
    }

    /// Whether the customization fee applies to this line.
    #[must_use]
    pub const fn is_customized(&self) -> bool {
        self.note.is_some()
    }

    /// Effective unit price: base component plus the customization fee when
    /// the line is customized.
    #[must_use]
    pub fn unit_price(&self) -> Money {
        self.components.unit_price(self.is_customized())
    }

    /// The line's contribution to the cart subtotal (base component only).
    #[must_use]
    pub fn base_total(&self) -> Money {
        self.components.unit_base() * self.quantity
    }

    /// The line's contribution to the cart customization total.
    #[must_use]
    pub fn customization_total(&self) -> Money {
        if self.is_customized() {
            self.components.customization_fee * self.quantity
        } else {
            Money::zero(self.components.base_price.currency())
        }
    }

    /// Base and customization contributions combined.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity
    }
}

/// Result of an `add_item` call.
///
/// `added` is the number of units this call actually put in the cart; when
/// it falls short of `requested` the quantity was clamped to available stock
/// (or the hard cap) and `adjusted` is set so the UI can say so.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    /// Identity of the line the call targeted.
    pub key: LineKey,
    /// Units the caller asked for.
    pub requested: u32,
    /// Units actually added by this call.
    pub added: u32,
    /// The line's resulting quantity (0 if nothing was added and no line
    /// exists).
    pub line_quantity: u32,
    /// Whether the request was reduced by stock or the per-line cap.
    pub adjusted: bool,
}

/// Result of an `update_quantity` call on an existing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityOutcome {
    /// The quantity the caller asked for.
    pub requested: u32,
    /// The quantity the line now holds.
    pub quantity: u32,
    /// Whether the applied quantity differs from the request.
    pub adjusted: bool,
}

/// An ordered collection of cart lines with recomputed aggregates.
///
/// Line order is insertion order and never affects totals. All mutation goes
/// through the operations here; shipping and discounts are applied later by
/// the order total calculator, so `total` is merchandise only
/// (subtotal + customization total).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    item_count: u32,
    subtotal: Money,
    customization_total: Money,
    total: Money,
    updated_at: DateTime<Utc>,
}

impl Cart {
    /// An empty cart with zero aggregates.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            item_count: 0,
            subtotal: Money::default(),
            customization_total: Money::default(),
            total: Money::default(),
            updated_at: Utc::now(),
        }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by its identity key.
    #[must_use]
    pub fn line(&self, key: LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.key() == key)
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub const fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Sum of base components (base price + variation delta) times quantity.
    #[must_use]
    pub const fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// Sum of customization fees times quantity over customized lines.
    #[must_use]
    pub const fn customization_total(&self) -> Money {
        self.customization_total
    }

    /// Merchandise total: subtotal plus customization total. Shipping and
    /// discounts are not included here.
    #[must_use]
    pub const fn total(&self) -> Money {
        self.total
    }

    /// When the cart last changed.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Add units of a product, merging into an existing line with the same
    /// identity key or appending a new one.
    ///
    /// The applied quantity is clamped to `min(stock, MAX_LINE_QUANTITY)`;
    /// on a merge, fresh stock re-clamps the whole line while the frozen
    /// price components are kept. A product with zero purchasable stock
    /// leaves the cart untouched and reports zero units added.
    pub fn add_item(
        &mut self,
        product: &Product,
        variation: Option<&Variation>,
        requested: u32,
        note: Option<String>,
    ) -> AddOutcome {
        let key = LineKey {
            product: product.id,
            customized: note.is_some(),
        };
        let capacity = product.available_stock(variation).min(MAX_LINE_QUANTITY);
        if capacity == 0 || requested == 0 {
            // Out of stock, or nothing asked for: the cart stays as it is.
            return AddOutcome {
                key,
                requested,
                added: 0,
                line_quantity: self.line(key).map_or(0, |line| line.quantity),
                adjusted: requested > 0 && capacity == 0,
            };
        }

        let outcome = if let Some(line) = self.lines.iter_mut().find(|line| line.key() == key) {
            // Merge: fresh stock wins, frozen price components stay.
            let before = line.quantity;
            line.capacity = capacity;
            line.quantity = before.saturating_add(requested).min(capacity);
            let added = line.quantity.saturating_sub(before);
            AddOutcome {
                key,
                requested,
                added,
                line_quantity: line.quantity,
                adjusted: added < requested,
            }
        } else {
            let quantity = requested.min(capacity);
            self.lines.push(CartLine {
                product: product.id,
                name: product.name.clone(),
                variation: variation.map(|v| v.id),
                variation_label: variation.map(|v| v.label.clone()),
                note,
                quantity,
                components: price_components(product, variation),
                capacity,
            });
            AddOutcome {
                key,
                requested,
                added: quantity,
                line_quantity: quantity,
                adjusted: quantity < requested,
            }
        };
        self.recompute();
        outcome
    }

    /// Set a line's quantity, clamped to `[1, capacity]`.
    ///
    /// A request below 1 is a no-op — quantity never reaches zero through
    /// this path; use [`Cart::remove_line`] to drop a line. Returns `None`
    /// when no line matches the key.
    pub fn update_quantity(&mut self, key: LineKey, requested: u32) -> Option<QuantityOutcome> {
        let line = self.lines.iter_mut().find(|line| line.key() == key)?;
        if requested < 1 {
            return Some(QuantityOutcome {
                requested,
                quantity: line.quantity,
                adjusted: true,
            });
        }
        let quantity = requested.min(line.capacity);
        line.quantity = quantity;
        self.recompute();
        Some(QuantityOutcome {
            requested,
            quantity,
            adjusted: quantity != requested,
        })
    }

    /// Remove the line with the given key. Returns whether a line was
    /// removed.
    pub fn remove_line(&mut self, key: LineKey) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.key() != key);
        if self.lines.len() == before {
            return false;
        }
        self.recompute();
        true
    }

    /// Empty the cart and reset all aggregates to zero.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute();
    }

    /// Rebuild every aggregate from the line collection.
    fn recompute(&mut self) {
        self.item_count = self.lines.iter().map(|line| line.quantity).sum();
        self.subtotal = self.lines.iter().map(CartLine::base_total).sum();
        self.customization_total = self.lines.iter().map(CartLine::customization_total).sum();
        self.total = self.subtotal + self.customization_total;
        self.updated_at = Utc::now();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}
