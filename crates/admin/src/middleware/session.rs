//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. Login state and
//! recovery flow progress both live here.

use secrecy::ExposeSecret;
use tower_sessions::cookie::Key;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::AdminConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "masoro_admin_session";

/// Session expiry time in seconds (8 hours, one shift).
const SESSION_EXPIRY_SECONDS: i64 = 8 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &AdminConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Derive a cookie signing key from the configured session secret.
///
/// Returns `None` when no secret is configured; sessions run unsigned
/// in that case. Config validation guarantees the secret is at least
/// 32 bytes, which `Key::derive_from` requires.
#[must_use]
pub fn signing_key(config: &AdminConfig) -> Option<Key> {
    config
        .session_secret
        .as_ref()
        .map(|secret| Key::derive_from(secret.expose_secret().as_bytes()))
}
