//! Session-stored state.
//!
//! The cart and the chosen dining option live in the visitor's session.
//! Helpers here wrap the tower-sessions get/insert calls so handlers
//! stay short.

use masoro_core::cart::Cart;
use masoro_core::types::DiningOption;
use tower_sessions::Session;

use crate::error::Result;

/// Session keys for storefront data.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";

    /// Key for the chosen dining option.
    pub const DINING_OPTION: &str = "dining_option";
}

/// Load the cart from the session, defaulting to an empty cart.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Persist the cart back to the session.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(keys::CART, cart).await?;
    Ok(())
}

/// Load the dining option from the session, defaulting to takeout.
pub async fn load_dining_option(session: &Session) -> Result<DiningOption> {
    Ok(session
        .get::<DiningOption>(keys::DINING_OPTION)
        .await?
        .unwrap_or_default())
}

/// Persist the dining option to the session.
pub async fn save_dining_option(session: &Session, option: DiningOption) -> Result<()> {
    session.insert(keys::DINING_OPTION, &option).await?;
    Ok(())
}
