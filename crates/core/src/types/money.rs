//! Type-safe money representation using decimal arithmetic.
//!
//! The storefront trades in a single currency (Sri Lankan rupees), so the
//! arithmetic here is deliberately infallible: operations keep the left
//! operand's currency and mixing currencies is a programming error caught by
//! debug assertions, not a runtime failure surfaced to render paths.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Sub};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A monetary amount with its currency.
///
/// Amounts are serialized as strings (via `rust_decimal::serde::str`) so
/// payloads survive JSON round-trips without precision loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (rupees, not cents).
    #[serde(with = "rust_decimal::serde::str")]
    amount: Decimal,
    /// ISO 4217 currency code.
    currency: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// A whole-rupee amount in the storefront currency.
    #[must_use]
    pub fn rupees(amount: i64) -> Self {
        Self::new(Decimal::from(amount), CurrencyCode::LKR)
    }

    /// The zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency code.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Round to two decimal places, half-up (the storefront's display and
    /// discount rounding rule).
    #[must_use]
    pub fn rounded_to_cents(self) -> Self {
        Self::new(
            self.amount
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            self.currency,
        )
    }
}

impl Default for Money {
    /// Zero in the storefront currency.
    fn default() -> Self {
        Self::zero(CurrencyCode::default())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        debug_assert_eq!(self.currency, rhs.currency, "currency mismatch in add");
        Self::new(self.amount + rhs.amount, self.currency)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        debug_assert_eq!(self.currency, rhs.currency, "currency mismatch in sub");
        Self::new(self.amount - rhs.amount, self.currency)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.currency.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes accepted by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Sri Lankan rupee — the storefront currency.
    #[default]
    LKR,
    USD,
}

impl CurrencyCode {
    /// Display symbol for price formatting.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::LKR => "Rs",
            Self::USD => "$",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::LKR => "LKR",
            Self::USD => "USD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rupees_constructor() {
        let price = Money::rupees(350);
        assert_eq!(price.amount(), Decimal::from(350));
        assert_eq!(price.currency(), CurrencyCode::LKR);
    }

    #[test]
    fn test_arithmetic() {
        let base = Money::rupees(1200);
        let delta = Money::rupees(150);
        assert_eq!(base + delta, Money::rupees(1350));
        assert_eq!(base - delta, Money::rupees(1050));
        assert_eq!(delta * 3, Money::rupees(450));
    }

    #[test]
    fn test_sum_of_lines() {
        let total: Money = [Money::rupees(100), Money::rupees(250), Money::rupees(50)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::rupees(400));
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let total: Money = core::iter::empty::<Money>().sum();
        assert!(total.is_zero());
        assert_eq!(total.currency(), CurrencyCode::LKR);
    }

    #[test]
    fn test_rounded_to_cents_half_up() {
        let value = Money::new(Decimal::new(16_645, 3), CurrencyCode::LKR); // 16.645
        assert_eq!(
            value.rounded_to_cents().amount(),
            Decimal::new(1665, 2) // 16.65
        );
    }

    #[test]
    fn test_is_negative() {
        assert!(!Money::rupees(0).is_negative());
        assert!(!Money::rupees(10).is_negative());
        assert!((Money::rupees(0) - Money::rupees(10)).is_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::rupees(3500).to_string(), "Rs 3500.00");
        assert_eq!(
            Money::new(Decimal::new(125_050, 2), CurrencyCode::LKR).to_string(),
            "Rs 1250.50"
        );
    }

    #[test]
    fn test_currency_code_metadata() {
        assert_eq!(CurrencyCode::LKR.code(), "LKR");
        assert_eq!(CurrencyCode::LKR.symbol(), "Rs");
        assert_eq!(CurrencyCode::USD.symbol(), "$");
    }

    #[test]
    fn test_serde_amount_as_string() {
        let price = Money::rupees(499);
        let json = serde_json::to_string(&price).unwrap();
        assert!(json.contains("\"499\""));

        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
