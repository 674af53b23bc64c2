//! Checkout engine errors.
//!
//! The pure pricing paths (zones, line pricing, discounts, totals) are total
//! functions and never fail, so render code calls them without error
//! plumbing. Only the remote-backed session operations can fail, and every
//! failure here means local cart state was left exactly as it was.

use kade_core::{ProductId, VariationId};
use thiserror::Error;

use crate::gateway::GatewayError;

/// Errors surfaced by remote-backed checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A catalog product lookup failed.
    #[error("Catalog lookup for product {product} failed: {source}")]
    Catalog {
        /// The product that was being fetched.
        product: ProductId,
        /// The underlying gateway failure.
        #[source]
        source: GatewayError,
    },

    /// The selected variation does not exist on the product.
    #[error("Product {product} has no variation {variation}")]
    VariationNotFound {
        /// The product that was being added.
        product: ProductId,
        /// The variation the caller selected.
        variation: VariationId,
    },

    /// A cart mutation could not be persisted; the local cart and its
    /// aggregates were not changed.
    #[error("Cart {operation} failed: {source}")]
    CartSync {
        /// The session operation that failed.
        operation: &'static str,
        /// The underlying gateway failure.
        #[source]
        source: GatewayError,
    },

    /// The backend did not accept the order; the cart was kept.
    #[error("Order submission failed: {source}")]
    Submission {
        /// The underlying gateway failure.
        #[source]
        source: GatewayError,
    },
}

/// Result type alias for [`CheckoutError`].
pub type Result<T> = std::result::Result<T, CheckoutError>;
