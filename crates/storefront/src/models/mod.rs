//! Request-side data types for the storefront.

pub mod session;
