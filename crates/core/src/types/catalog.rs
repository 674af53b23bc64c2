//! Catalog read models.
//!
//! Products and variations are owned by the backend catalog service; the
//! pricing engine only reads them. The fields here are the subset the engine
//! needs: prices, stock levels, and the optional customization fee.

use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariationId};
use super::money::Money;

/// A purchasable option of a product (typically a size) with its own stock
/// level and price delta on top of the product's base price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    /// Variation ID.
    pub id: VariationId,
    /// Size label shown to the shopper (e.g., "M", "XL", "10 inch").
    pub label: String,
    /// Additional price on top of the product base price. Never negative.
    pub price_delta: Money,
    /// Units in stock for this variation.
    pub stock: u32,
}

impl Variation {
    /// Whether the shopper may select this variation at all.
    ///
    /// Out-of-stock variations are filtered out of the product page; the
    /// engine treats them as zero capacity if one slips through.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.stock > 0
    }
}

/// A product as the pricing engine sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Base unit price before variation deltas and customization fees.
    pub base_price: Money,
    /// Per-unit surcharge when the shopper requests customization
    /// (engraving, name print). `None` when the product cannot be
    /// customized.
    pub customization_fee: Option<Money>,
    /// Units in stock for the product itself (used when no variation is
    /// selected).
    pub stock: u32,
    /// Purchasable variations, possibly empty.
    pub variations: Vec<Variation>,
}

impl Product {
    /// Look up a variation by ID.
    #[must_use]
    pub fn variation(&self, id: VariationId) -> Option<&Variation> {
        self.variations.iter().find(|v| v.id == id)
    }

    /// Whether the product is sold in variations.
    #[must_use]
    pub fn has_variations(&self) -> bool {
        !self.variations.is_empty()
    }

    /// Whether the catalog defines a customization fee for this product.
    #[must_use]
    pub const fn supports_customization(&self) -> bool {
        self.customization_fee.is_some()
    }

    /// Stock available for a purchase: the selected variation's stock, or
    /// the product's own stock when buying without a variation.
    #[must_use]
    pub fn available_stock(&self, variation: Option<&Variation>) -> u32 {
        variation.map_or(self.stock, |v| v.stock)
    }
}
