//! Business-account discount resolution.
//!
//! The storefront runs two distinct promotions for Business accounts, one
//! per screen: 5% off merchandise on the cart page, 10% off the
//! shipping-inclusive amount at checkout review. The two rates disagree on
//! purpose — each came from a different promotion — so a Business customer
//! sees different totals on the two screens. The engine keeps them as
//! explicitly separate stages instead of quietly unifying them; callers pick
//! the stage that matches their screen.

use kade_core::{AccountType, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Business discount on the cart summary page, percent off merchandise
/// (subtotal + customization), excluding shipping.
pub const CART_BUSINESS_DISCOUNT_PERCENT: u32 = 5;

/// Business discount at the checkout review step, percent off the whole
/// pre-discount amount including shipping.
pub const REVIEW_BUSINESS_DISCOUNT_PERCENT: u32 = 10;

/// Which screen's promotion rules apply to a totals computation.
///
/// Order submission always uses [`PricingStage::CheckoutReview`] — the
/// totals the customer confirmed are the totals the backend receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingStage {
    /// The cart page: 5% Business discount on merchandise only; shipping is
    /// added after the discount.
    CartSummary,
    /// The checkout review step: 10% Business discount on
    /// merchandise + shipping.
    CheckoutReview,
}

impl PricingStage {
    /// The Business discount percentage at this stage.
    #[must_use]
    pub const fn business_discount_percent(self) -> u32 {
        match self {
            Self::CartSummary => CART_BUSINESS_DISCOUNT_PERCENT,
            Self::CheckoutReview => REVIEW_BUSINESS_DISCOUNT_PERCENT,
        }
    }

    /// Whether the shipping fee is part of the discount base at this stage.
    #[must_use]
    pub const fn discounts_shipping(self) -> bool {
        matches!(self, Self::CheckoutReview)
    }
}

impl std::fmt::Display for PricingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CartSummary => write!(f, "cart_summary"),
            Self::CheckoutReview => write!(f, "checkout_review"),
        }
    }
}

/// A resolved discount: the amount taken off and what remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discount {
    /// Amount deducted, rounded half-up to two decimal places.
    pub amount: Money,
    /// `base − amount`. Never negative, since the base never is.
    pub net: Money,
}

/// Resolve the account-type discount on a base amount.
///
/// Personal accounts get no discount. Business accounts get the stage's
/// percentage, rounded half-up to two decimal places.
#[must_use]
pub fn business_discount(base: Money, account: AccountType, stage: PricingStage) -> Discount {
    if !account.is_business() {
        return Discount {
            amount: Money::zero(base.currency()),
            net: base,
        };
    }
    let rate = Decimal::from(stage.business_discount_percent()) / Decimal::ONE_HUNDRED;
    let amount = Money::new(base.amount() * rate, base.currency()).rounded_to_cents();
    Discount {
        amount,
        net: base - amount,
    }
}
