//! Kade Core - Shared types library.
//!
//! This crate provides common types used across all Kade components:
//! - `checkout` - Cart, pricing, and order-placement engine
//! - the storefront and back-office applications that embed it
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money, accounts, catalog read models, and the
//!   shipping selection
#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
