//! Masoro Core - Domain types and ordering logic.
//!
//! This crate provides the types and business rules shared by all Masoro
//! Kitchen components:
//! - `storefront` - Public-facing ordering site
//! - `admin` - Internal administration console
//! - `cli` - Command-line tools for data export and seed validation
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! HTTP, no sessions. The cart, pricing, and happy-hour logic here is
//! callable (and tested) independently of any rendering layer.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and statuses
//! - [`catalog`] - Menu items and the read-only catalog
//! - [`pricing`] - Happy-hour window and effective price resolution
//! - [`cart`] - Cart aggregate with locked-in line prices and totals
//! - [`order`] - Customer orders as managed by the admin console
//! - [`staff`] - Staff accounts for the admin console
//! - [`settings`] - Restaurant settings (hours, happy hour, delivery, tax)
//! - [`seed`] - Mock data the system boots from

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod pricing;
pub mod seed;
pub mod settings;
pub mod staff;
pub mod types;

pub use cart::{Cart, CartLine, CartTotals};
pub use catalog::{Catalog, Category, DraftError, MenuItem, MenuItemDraft};
pub use order::{Order, OrderDraft, OrderDraftError, OrderLine};
pub use pricing::{HappyHourWindow, effective_price};
pub use settings::{DeliveryConfig, HappyHourConfig, RestaurantSettings, TaxConfig};
pub use staff::{StaffAccount, StaffDraft, StaffError};
pub use types::*;
