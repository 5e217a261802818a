//! Session-facing data types for the admin console.

pub mod session;

pub use session::{CurrentStaff, RecoveryState, RecoveryStep, keys as session_keys};
