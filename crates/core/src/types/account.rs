//! Account classification.

use serde::{Deserialize, Serialize};

/// Storefront account classification.
///
/// Business accounts are wholesale buyers registered with the back office;
/// they receive percentage discounts the pricing engine resolves per call
/// site. Guests and ordinary shoppers are Personal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    #[default]
    Personal,
    Business,
}

impl AccountType {
    /// Whether this account qualifies for business discounts.
    #[must_use]
    pub const fn is_business(self) -> bool {
        matches!(self, Self::Business)
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Personal => write!(f, "personal"),
            Self::Business => write!(f, "business"),
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(Self::Personal),
            "business" => Ok(Self::Business),
            _ => Err(format!("invalid account type: {s}")),
        }
    }
}
