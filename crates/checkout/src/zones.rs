//! Zone-based delivery fee resolution.
//!
//! Districts are grouped into named zones, each carrying one courier fee.
//! Resolution is a total function: a blank or unknown district falls back to
//! [`DEFAULT_DELIVERY_FEE`] instead of failing, so checkout form validation
//! (an upstream concern) is the only place a bad district is rejected.
//!
//! Personal accounts are charged a flat island-wide rate regardless of zone.
//! This is a standing business rule separate from the zone data: the zone
//! fees were negotiated with the courier for bulk (business) shipments only.

use kade_core::{AccountType, Money};

/// Flat courier fee for Personal-account deliveries, island-wide.
pub const PERSONAL_DELIVERY_FEE: i64 = 500;

/// Fallback fee when the destination district is blank or not covered by
/// any zone.
pub const DEFAULT_DELIVERY_FEE: i64 = 350;

/// Built-in zone data: province zones over the 25 districts, with the
/// courier's per-zone fee in rupees.
const BUILTIN_ZONES: &[(&str, i64, &[&str])] = &[
    ("Western", 500, &["Colombo", "Gampaha", "Kalutara"]),
    ("Central", 400, &["Kandy", "Matale", "Nuwara Eliya"]),
    ("Southern", 400, &["Galle", "Matara", "Hambantota"]),
    (
        "Northern",
        250,
        &["Jaffna", "Kilinochchi", "Mannar", "Mullaitivu", "Vavuniya"],
    ),
    ("Eastern", 300, &["Ampara", "Batticaloa", "Trincomalee"]),
    ("North Western", 350, &["Kurunegala", "Puttalam"]),
    ("North Central", 300, &["Anuradhapura", "Polonnaruwa"]),
    ("Uva", 400, &["Badulla", "Monaragala"]),
    ("Sabaragamuwa", 350, &["Kegalle", "Ratnapura"]),
];

/// A named group of districts sharing one delivery fee.
#[derive(Debug, Clone)]
pub struct Zone {
    name: String,
    fee: i64,
    districts: Vec<String>,
}

impl Zone {
    /// Create a zone from a name, a whole-rupee fee, and its districts.
    pub fn new(
        name: impl Into<String>,
        fee: i64,
        districts: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            fee,
            districts: districts.into_iter().map(Into::into).collect(),
        }
    }

    /// Zone name (e.g., "Western").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The zone's delivery fee in whole rupees.
    #[must_use]
    pub const fn fee(&self) -> i64 {
        self.fee
    }

    /// Whether the given (already trimmed) district belongs to this zone.
    fn covers(&self, district: &str) -> bool {
        self.districts
            .iter()
            .any(|d| d.eq_ignore_ascii_case(district))
    }
}

/// Static mapping from destination district to delivery fee.
#[derive(Debug, Clone)]
pub struct ZoneTable {
    zones: Vec<Zone>,
}

impl ZoneTable {
    /// Build a table from bespoke zone data (tests, seasonal fee changes).
    #[must_use]
    pub fn new(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    /// Resolve the delivery fee for a destination district.
    ///
    /// Resolution order:
    /// 1. blank district - [`DEFAULT_DELIVERY_FEE`] (the Personal override
    ///    requires a destination);
    /// 2. Personal account - flat [`PERSONAL_DELIVERY_FEE`] regardless of
    ///    zone;
    /// 3. zone lookup (trimmed, case-insensitive district match);
    /// 4. no match - [`DEFAULT_DELIVERY_FEE`].
    ///
    /// Total function: never fails, never charges for pickup (pickup never
    /// reaches the table - see the order total calculator).
    #[must_use]
    pub fn resolve(&self, district: &str, account: Option<AccountType>) -> Money {
        let district = district.trim();
        if district.is_empty() {
            return Money::rupees(DEFAULT_DELIVERY_FEE);
        }
        if account == Some(AccountType::Personal) {
            return Money::rupees(PERSONAL_DELIVERY_FEE);
        }
        self.zone_for(district)
            .map_or(Money::rupees(DEFAULT_DELIVERY_FEE), |zone| {
                Money::rupees(zone.fee)
            })
    }

    /// The zone covering a district, if any (used for display, e.g. the
    /// delivery-estimate line under the district picker).
    #[must_use]
    pub fn zone_for(&self, district: &str) -> Option<&Zone> {
        let district = district.trim();
        self.zones.iter().find(|zone| zone.covers(district))
    }
}

impl Default for ZoneTable {
    /// The built-in island-wide table.
    fn default() -> Self {
        Self::new(
            BUILTIN_ZONES
                .iter()
                .map(|&(name, fee, districts)| Zone::new(name, fee, districts.iter().copied()))
                .collect(),
        )
    }
}
