//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Menu
//! GET  /menu                   - Menu page (?category=, ?q=)
//! GET  /menu/grid              - Menu grid fragment (HTMX)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add item (returns count badge, triggers cart-updated)
//! POST /cart/remove            - Remove one unit (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /cart/dining-option     - Switch takeout/dine-in (returns cart_items fragment)
//!
//! # Checkout
//! POST /checkout               - Place order, clear cart, show confirmation
//! ```

pub mod cart;
pub mod home;
pub mod menu;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the menu routes router.
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::index))
        .route("/grid", get(menu::grid))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/dining-option", post(cart::dining_option))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/menu", menu_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
}
