//! Boundary contracts to the storefront backend.
//!
//! The engine never talks to a transport directly. Catalog reads, cart
//! persistence, the anonymous-cart backup copy, and order submission all go
//! through the traits here; the HTTP, database, and local-storage
//! implementations live with the embedding application. Timeouts and
//! retries belong to those implementations too.

use async_trait::async_trait;
use kade_core::{CustomerId, Product, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::cart::Cart;
use crate::order::{OrderConfirmation, OrderPayload};

/// Errors surfaced by gateway implementations.
///
/// Deliberately transport-agnostic: an HTTP client maps its status codes
/// here, a database store maps its query errors, and the engine treats them
/// all the same way — local state is kept and the failure is reported.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The backend could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The session is not allowed to perform the operation.
    #[error("Not authorized")]
    Unauthorized,

    /// The requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend understood the request and refused it.
    #[error("Rejected by backend: {0}")]
    Rejected(String),
}

/// Who a persisted cart belongs to.
///
/// Signed-in customers round-trip their cart through the [`CartStore`];
/// anonymous visitors keep the cart locally, with a [`CartBackup`] copy
/// written after every successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartOwner {
    /// An authenticated customer.
    Customer {
        /// The customer's backend ID.
        id: CustomerId,
    },
    /// A guest, keyed by a per-visit session ID.
    Anonymous {
        /// Random session key, minted when the visit starts.
        session: Uuid,
    },
}

impl CartOwner {
    /// An authenticated customer owner.
    #[must_use]
    pub const fn customer(id: CustomerId) -> Self {
        Self::Customer { id }
    }

    /// A fresh anonymous owner with a random session key.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::Anonymous {
            session: Uuid::new_v4(),
        }
    }

    /// Whether this owner is a signed-in customer.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Customer { .. })
    }
}

impl std::fmt::Display for CartOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer { id } => write!(f, "customer:{id}"),
            Self::Anonymous { session } => write!(f, "anonymous:{session}"),
        }
    }
}

/// Read-only product lookup, owned by the backend catalog service.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch a product with its variations, stock, and customization fee.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] for an unknown product, or a
    /// transport error.
    async fn product(&self, id: ProductId) -> Result<Product, GatewayError>;
}

/// Persistence for authenticated customers' carts.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Load the owner's saved cart, if any.
    ///
    /// # Errors
    ///
    /// Returns a transport or authorization error.
    async fn load(&self, owner: &CartOwner) -> Result<Option<Cart>, GatewayError>;

    /// Persist the cart and return the stored copy.
    ///
    /// The returned cart is the store's authoritative view; the session
    /// replaces its local state with it wholesale.
    ///
    /// # Errors
    ///
    /// Returns a transport or authorization error; on error nothing was
    /// persisted.
    async fn save(&self, owner: &CartOwner, cart: &Cart) -> Result<Cart, GatewayError>;
}

/// Best-effort backup sink for anonymous carts (browser local storage in
/// the storefront).
#[async_trait]
pub trait CartBackup: Send + Sync {
    /// Write a backup copy of the cart.
    ///
    /// # Errors
    ///
    /// Returns a transport error. Callers treat failure as non-fatal: the
    /// in-memory cart stays the source of truth for guests.
    async fn persist(&self, cart: &Cart) -> Result<(), GatewayError>;
}

/// Order submission to the backend.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submit a complete order payload.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Rejected`] when the backend refuses the
    /// order (failed payment authorization, stock gone), or a transport
    /// error. On error no order exists and the cart must be kept.
    async fn place_order(&self, payload: &OrderPayload) -> Result<OrderConfirmation, GatewayError>;
}
