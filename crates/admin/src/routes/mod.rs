//! HTTP route handlers for the admin console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Dashboard (requires login)
//! GET  /health                   - Health check
//!
//! # Auth
//! GET  /login                    - Login page
//! POST /login                    - Login action
//! POST /logout                   - Logout action
//!
//! # Password recovery (five steps, in order)
//! GET  /recovery                 - Recovery page (step one)
//! POST /recovery/start           - Submit username
//! POST /recovery/contact         - Submit matching email or phone
//! POST /recovery/code            - Submit six-digit code
//! POST /recovery/security        - Submit security answer
//! POST /recovery/reset           - Submit new password
//!
//! # Menu
//! GET  /menu                     - Menu item table (?q=&category=)
//! GET  /menu/new                 - New item form
//! POST /menu                     - Create item
//! GET  /menu/{id}/edit           - Edit form
//! POST /menu/{id}                - Update item
//! POST /menu/{id}/delete         - Delete item
//! POST /menu/{id}/toggle         - Toggle availability
//! POST /menu/{id}/duplicate      - Duplicate item
//!
//! # Orders
//! GET  /orders                   - Order table (?status=)
//! GET  /orders/{id}/edit         - Edit form (customer fields)
//! POST /orders/{id}              - Update order
//! POST /orders/{id}/status       - Change status
//! POST /orders/{id}/delete       - Delete order
//! POST /orders/{id}/duplicate    - Re-submit a copy
//!
//! # Staff
//! GET  /staff                    - Staff table
//! GET  /staff/new                - New account form
//! POST /staff                    - Create account
//! GET  /staff/{username}/edit    - Edit form
//! POST /staff/{username}         - Update account
//! POST /staff/{username}/delete  - Delete account
//! POST /staff/{username}/toggle  - Toggle active flag
//!
//! # Settings
//! GET  /settings                 - Settings form
//! POST /settings                 - Update settings
//!
//! # Export (JSON downloads)
//! GET  /export/menu
//! GET  /export/orders
//! GET  /export/staff
//! GET  /export/settings
//! ```

pub mod auth;
pub mod dashboard;
pub mod export;
pub mod menu;
pub mod orders;
pub mod settings;
pub mod staff;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth and recovery routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/recovery", get(auth::recovery_page))
        .route("/recovery/start", post(auth::recovery_start))
        .route("/recovery/contact", post(auth::recovery_contact))
        .route("/recovery/code", post(auth::recovery_code))
        .route("/recovery/security", post(auth::recovery_security))
        .route("/recovery/reset", post(auth::recovery_reset))
}

/// Create the menu management routes router.
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::index).post(menu::create))
        .route("/new", get(menu::new_form))
        .route("/{id}", post(menu::update))
        .route("/{id}/edit", get(menu::edit_form))
        .route("/{id}/delete", post(menu::delete))
        .route("/{id}/toggle", post(menu::toggle))
        .route("/{id}/duplicate", post(menu::duplicate))
}

/// Create the order management routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", post(orders::update))
        .route("/{id}/edit", get(orders::edit_form))
        .route("/{id}/status", post(orders::set_status))
        .route("/{id}/delete", post(orders::delete))
        .route("/{id}/duplicate", post(orders::duplicate))
}

/// Create the staff management routes router.
pub fn staff_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(staff::index).post(staff::create))
        .route("/new", get(staff::new_form))
        .route("/{username}", post(staff::update))
        .route("/{username}/edit", get(staff::edit_form))
        .route("/{username}/delete", post(staff::delete))
        .route("/{username}/toggle", post(staff::toggle))
}

/// Create the export routes router.
pub fn export_routes() -> Router<AppState> {
    Router::new()
        .route("/menu", get(export::menu))
        .route("/orders", get(export::orders))
        .route("/staff", get(export::staff))
        .route("/settings", get(export::settings))
}

/// Create all routes for the admin console.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .merge(auth_routes())
        .nest("/menu", menu_routes())
        .nest("/orders", order_routes())
        .nest("/staff", staff_routes())
        .route(
            "/settings",
            get(settings::index).post(settings::update),
        )
        .nest("/export", export_routes())
}
