//! Core types for Kade.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod account;
pub mod catalog;
pub mod id;
pub mod money;
pub mod shipping;

pub use account::AccountType;
pub use catalog::{Product, Variation};
pub use id::*;
pub use money::{CurrencyCode, Money};
pub use shipping::ShippingSelection;
