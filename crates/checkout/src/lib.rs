//! Kade checkout engine.
//!
//! The order pricing and cart-consistency engine of the Kade storefront:
//! given a cart of line items, an account type, a destination, and a
//! fulfillment method, it deterministically computes subtotal, customization
//! fees, shipping fee, discount, and final total — and keeps those numbers
//! identical between the cart page, the checkout review step, and the order
//! payload submitted to the backend.
//!
//! # Architecture
//!
//! - The pricing modules ([`pricing`], [`zones`], [`discount`], [`totals`])
//!   are pure and total: no I/O, no failures, callable straight from render
//!   paths.
//! - [`cart`] owns the line collection and recomputes its aggregates from
//!   scratch after every mutation.
//! - [`session`] is the single writer: one [`CartSession`] per visitor,
//!   serializing remote-backed mutations and replacing local state with the
//!   store's response.
//! - [`gateway`] declares the boundary traits the embedding application
//!   implements; [`cache`] layers a read-through product cache over any
//!   catalog.
//!
//! # Example
//!
//! ```rust,ignore
//! use kade_checkout::{CartOwner, CartSession, PricingStage};
//! use kade_core::{AccountType, ShippingSelection};
//!
//! let mut session = CartSession::new(backends, CartOwner::anonymous(), AccountType::Personal);
//! let outcome = session.add_item(product_id, None, 2, None).await?;
//! if outcome.adjusted {
//!     // show a "quantity adjusted" notice
//! }
//! let totals = session.totals(
//!     &ShippingSelection::delivery("Kandy"),
//!     PricingStage::CartSummary,
//! );
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod cart;
pub mod discount;
pub mod error;
pub mod gateway;
pub mod order;
pub mod pricing;
pub mod session;
pub mod totals;
pub mod zones;

pub use cache::CachedCatalog;
pub use cart::{AddOutcome, Cart, CartLine, LineKey, MAX_LINE_QUANTITY, QuantityOutcome};
pub use discount::{
    CART_BUSINESS_DISCOUNT_PERCENT, Discount, PricingStage, REVIEW_BUSINESS_DISCOUNT_PERCENT,
    business_discount,
};
pub use error::{CheckoutError, Result};
pub use gateway::{CartBackup, CartOwner, CartStore, GatewayError, OrderGateway, ProductCatalog};
pub use order::{BillingDetails, OrderConfirmation, OrderLine, OrderPayload, PaymentMethod};
pub use pricing::{PriceComponents, price_components, unit_price};
pub use session::{Backends, CartSession, SyncCursor};
pub use totals::{OrderTotals, order_totals};
pub use zones::{DEFAULT_DELIVERY_FEE, PERSONAL_DELIVERY_FEE, Zone, ZoneTable};
