//! Middleware layers and extractors for the admin console.

pub mod auth;
pub mod session;

pub use auth::{RequireStaffAuth, clear_current_staff, set_current_staff};
pub use session::{create_session_layer, signing_key};
