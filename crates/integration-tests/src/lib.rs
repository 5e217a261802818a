//! Integration tests for Masoro Kitchen.
//!
//! The tests drive the real HTTP servers, so both binaries must be running
//! before the ignored tests are executed:
//!
//! ```bash
//! cargo run -p masoro-storefront &
//! cargo run -p masoro-admin &
//!
//! cargo test -p masoro-integration-tests -- --ignored
//! ```
//!
//! Base URLs default to the local ports and can be overridden with
//! `STOREFRONT_BASE_URL` and `ADMIN_BASE_URL`.
//!
//! # Test Categories
//!
//! - `storefront_cart` - Menu browsing and cart flow against the storefront
//! - `admin_console` - Login, CRUD, and export flows against the admin console
