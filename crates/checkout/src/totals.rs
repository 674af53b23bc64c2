//! Order total composition.
//!
//! One fixed pipeline produces the totals block used everywhere a price is
//! shown or submitted: cart aggregates, then shipping, then discount, then
//! the final total. The cart page and the checkout review step run the same
//! pipeline with different [`PricingStage`] promotion rules; the order
//! payload embeds the checkout-review result. Pure throughout — identical
//! inputs give identical output and the cart is never touched.

use kade_core::{AccountType, Money, ShippingSelection};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::discount::{PricingStage, business_discount};
use crate::zones::ZoneTable;

/// The totals block shown on the cart page and checkout review step, and
/// embedded in the order payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Merchandise base: Σ (base price + variation delta) × quantity.
    pub subtotal: Money,
    /// Σ customization fee × quantity over customized lines.
    pub customization_total: Money,
    /// Zero for pickup; otherwise the zone table's fee for the destination.
    pub shipping_fee: Money,
    /// The stage's Business discount (zero for Personal accounts).
    pub discount: Money,
    /// What the customer pays.
    pub total: Money,
}

/// Compute the totals for a cart, an account, and a fulfillment selection.
///
/// Steps, in fixed order:
///
/// 1. subtotal and customization total from the cart aggregates;
/// 2. shipping fee — zero for pickup, otherwise resolved through the zone
///    table (a delivery with a blank district gets the default fee rather
///    than an error; rejecting such submissions is checkout-form
///    validation's job);
/// 3. the discount base per stage — merchandise only on the cart page,
///    merchandise + shipping at checkout review;
/// 4. the stage's Business discount;
/// 5. the final total, re-adding shipping when it sat outside the discount
///    base.
#[must_use]
pub fn order_totals(
    zones: &ZoneTable,
    cart: &Cart,
    account: AccountType,
    shipping: &ShippingSelection,
    stage: PricingStage,
) -> OrderTotals {
    let subtotal = cart.subtotal();
    let customization_total = cart.customization_total();

    let shipping_fee = shipping.district().map_or_else(
        || Money::zero(subtotal.currency()),
        |district| zones.resolve(district, Some(account)),
    );

    let merchandise = subtotal + customization_total;
    let base = if stage.discounts_shipping() {
        merchandise + shipping_fee
    } else {
        merchandise
    };
    let resolved = business_discount(base, account, stage);
    let total = if stage.discounts_shipping() {
        resolved.net
    } else {
        resolved.net + shipping_fee
    };

    OrderTotals {
        subtotal,
        customization_total,
        shipping_fee,
        discount: resolved.amount,
        total,
    }
}
