//! Fulfillment selection made at checkout.

use serde::{Deserialize, Serialize};

use super::id::PickupLocationId;

/// How the order reaches the customer: couriered to a district, or collected
/// from one of the store's pickup points.
///
/// The district is free text straight from the checkout form; the zone table
/// resolves unknown or blank districts to its default fee rather than
/// failing, so carrying a raw `String` here is safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ShippingSelection {
    /// Courier delivery to a destination district.
    Delivery {
        /// Destination district (e.g., "Colombo", "Mullaitivu").
        district: String,
    },
    /// Customer collects from a pickup location; no shipping fee.
    Pickup {
        /// The chosen pickup location.
        location: PickupLocationId,
    },
}

impl ShippingSelection {
    /// Courier delivery to the given district.
    #[must_use]
    pub fn delivery(district: impl Into<String>) -> Self {
        Self::Delivery {
            district: district.into(),
        }
    }

    /// Collection from a pickup location.
    #[must_use]
    pub const fn pickup(location: PickupLocationId) -> Self {
        Self::Pickup { location }
    }

    /// Whether the customer collects the order themselves.
    #[must_use]
    pub const fn is_pickup(&self) -> bool {
        matches!(self, Self::Pickup { .. })
    }

    /// The destination district, if this is a delivery.
    #[must_use]
    pub fn district(&self) -> Option<&str> {
        match self {
            Self::Delivery { district } => Some(district),
            Self::Pickup { .. } => None,
        }
    }
}
