//! The order submission payload.
//!
//! Exactly one [`OrderPayload`] goes to the backend per placed order. It
//! snapshots the cart lines, the fulfillment and billing selections, and the
//! totals — recomputed at submission time by the session, never accepted
//! stale from a screen.

use chrono::{DateTime, Utc};
use kade_core::{AccountType, Money, OrderId, ProductId, ShippingSelection, VariationId};
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::gateway::CartOwner;
use crate::pricing::PriceComponents;
use crate::totals::OrderTotals;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Pay the courier on delivery.
    CashOnDelivery,
    /// Card payment through the gateway redirect.
    Card,
    /// Direct bank transfer, confirmed manually by the back office.
    BankTransfer,
}

/// Billing contact details captured on the checkout form.
///
/// Validation (non-empty name, parseable phone) happens on the form;
/// the engine carries the fields through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDetails {
    /// Customer name for the invoice.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Street address.
    pub address: String,
}

/// One cart line as it appears in the submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// The ordered product.
    pub product: ProductId,
    /// Selected variation, if any.
    pub variation: Option<VariationId>,
    /// Product display name at order time.
    pub name: String,
    /// The selected variation's size label.
    pub variation_label: Option<String>,
    /// Customization note, when the line is customized.
    pub note: Option<String>,
    /// Units ordered.
    pub quantity: u32,
    /// The per-unit price breakdown the line was priced with.
    pub components: PriceComponents,
    /// Quantity times the effective unit price.
    pub line_total: Money,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            product: line.product,
            variation: line.variation,
            name: line.name.clone(),
            variation_label: line.variation_label.clone(),
            note: line.note.clone(),
            quantity: line.quantity,
            components: line.components,
            line_total: line.line_total(),
        }
    }
}

/// Everything the backend needs to record an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Whose cart this order came from.
    pub owner: CartOwner,
    /// Account classification the totals were priced with.
    pub account: AccountType,
    /// Snapshot of the cart lines.
    pub lines: Vec<OrderLine>,
    /// Fulfillment selection.
    pub shipping: ShippingSelection,
    /// Billing contact details.
    pub billing: BillingDetails,
    /// Payment method.
    pub payment: PaymentMethod,
    /// Totals recomputed at submission time (checkout-review rules).
    pub totals: OrderTotals,
    /// When the customer placed the order.
    pub placed_at: DateTime<Utc>,
}

/// The backend's acknowledgement of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// The order's backend ID.
    pub order_id: OrderId,
}
