//! Line-item unit pricing.
//!
//! The effective unit price of a cart entry is never stored pre-mixed: the
//! cart keeps the [`PriceComponents`] breakdown per line and derives the
//! price through [`PriceComponents::unit_price`]. This is what lets the
//! aggregator report subtotal and customization total independently.

use kade_core::{Money, Product, Variation};
use serde::{Deserialize, Serialize};

/// The per-unit price breakdown of one cart entry, frozen at add time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceComponents {
    /// The product's base unit price.
    pub base_price: Money,
    /// The selected variation's surcharge (zero when none selected).
    pub variation_delta: Money,
    /// The product's customization fee (zero when the catalog defines
    /// none). Only charged when the line actually carries a customization.
    pub customization_fee: Money,
}

impl PriceComponents {
    /// The base component of the unit price: base price plus variation
    /// delta, excluding any customization fee. This is what the cart
    /// subtotal is built from.
    #[must_use]
    pub fn unit_base(&self) -> Money {
        self.base_price + self.variation_delta
    }

    /// The effective unit price: base component plus the customization fee
    /// when the line is customized.
    #[must_use]
    pub fn unit_price(&self, customized: bool) -> Money {
        if customized {
            self.unit_base() + self.customization_fee
        } else {
            self.unit_base()
        }
    }
}

/// Resolve the price breakdown for a product and an optionally selected
/// variation.
///
/// A product without a customization fee yields a zero fee component:
/// whether customization is offered at all is catalog data enforced
/// upstream, not something this function polices.
#[must_use]
pub fn price_components(product: &Product, variation: Option<&Variation>) -> PriceComponents {
    let currency = product.base_price.currency();
    PriceComponents {
        base_price: product.base_price,
        variation_delta: variation.map_or(Money::zero(currency), |v| v.price_delta),
        customization_fee: product.customization_fee.unwrap_or(Money::zero(currency)),
    }
}

/// The effective unit price of one cart entry:
/// base price + variation delta + customization fee if selected.
#[must_use]
pub fn unit_price(product: &Product, variation: Option<&Variation>, customized: bool) -> Money {
    price_components(product, variation).unit_price(customized)
}
