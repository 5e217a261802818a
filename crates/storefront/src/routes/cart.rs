//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the session; prices are locked in at the time
//! an item is first added.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use masoro_core::cart::Cart;
use masoro_core::types::{DiningOption, MenuItemId, Price};

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::session::{load_cart, load_dining_option, save_cart, save_dining_option};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub item_id: i32,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
    pub happy_hour_applied: bool,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub subtotal: String,
    pub delivery_fee: Option<String>,
    pub tax: String,
    pub total: String,
    pub dining_option_label: String,
    pub is_takeout: bool,
}

impl CartView {
    /// Build the display view from the session cart and dining option.
    #[must_use]
    pub fn build(cart: &Cart, dining_option: DiningOption, state: &AppState) -> Self {
        let totals = cart.totals(dining_option, state.delivery_fee(), state.tax_rate());
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            item_count: cart.item_count(),
            subtotal: format_price(totals.subtotal),
            delivery_fee: (dining_option == DiningOption::Takeout)
                .then(|| format_price(totals.delivery_fee)),
            tax: format_price(totals.tax),
            total: format_price(totals.total),
            dining_option_label: dining_option.label().to_string(),
            is_takeout: dining_option == DiningOption::Takeout,
        }
    }
}

impl From<&masoro_core::cart::CartLine> for CartItemView {
    fn from(line: &masoro_core::cart::CartLine) -> Self {
        Self {
            item_id: line.item_id.as_i32(),
            name: line.name.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            unit_price: format_price(line.unit_price),
            line_total: format_price(line.line_total()),
            happy_hour_applied: line.happy_hour_applied,
        }
    }
}

/// Format a price for display, currency prefix included.
fn format_price(price: Price) -> String {
    format!("RWF {price}")
}

/// Add/remove form data. One cart line per menu item, so the item id is
/// enough to address a line.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub item_id: i32,
}

/// Dining option form data.
#[derive(Debug, Deserialize)]
pub struct DiningOptionForm {
    pub option: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Checkout confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct CheckoutConfirmationTemplate {
    pub order_number: String,
    pub cart: CartView,
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CartShowTemplate> {
    let cart = load_cart(&session).await?;
    let dining_option = load_dining_option(&session).await?;

    Ok(CartShowTemplate {
        cart: CartView::build(&cart, dining_option, &state),
    })
}

/// Add item to cart (HTMX).
///
/// The first add of an item locks in its current effective price; later
/// adds of the same item only bump the quantity. Returns the cart count
/// badge with an HTMX trigger so other fragments can refresh.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    let item_id = MenuItemId::new(form.item_id);
    let Some(item) = state.catalog().get(item_id) else {
        return Err(AppError::NotFound(format!("menu item {item_id}")));
    };
    if !item.available {
        return Err(AppError::BadRequest(format!(
            "{} is currently unavailable",
            item.name
        )));
    }

    let mut cart = load_cart(&session).await?;
    cart.add_item(item, state.happy_hour_active());
    save_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.item_count(),
        },
    )
        .into_response())
}

/// Remove one unit of an item from the cart (HTMX).
///
/// Removing an item that is not in the cart is a no-op. Returns the cart
/// items fragment so the cart page re-renders in place.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    cart.remove_item(MenuItemId::new(form.item_id));
    save_cart(&session, &cart).await?;

    let dining_option = load_dining_option(&session).await?;
    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::build(&cart, dining_option, &state),
        },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = load_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.item_count(),
    })
}

/// Switch between takeout and dine-in (HTMX).
///
/// The delivery fee only applies to takeout, so the totals fragment is
/// returned for an in-place refresh.
#[instrument(skip(state, session))]
pub async fn dining_option(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<DiningOptionForm>,
) -> Result<Response> {
    let option: DiningOption = form.option.parse().map_err(AppError::BadRequest)?;
    save_dining_option(&session, option).await?;

    let cart = load_cart(&session).await?;
    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::build(&cart, option, &state),
        },
    )
        .into_response())
}

/// Place the order and show the confirmation page.
///
/// An empty cart redirects back to the cart page. Otherwise the cart is
/// cleared and a confirmation with the final totals is rendered.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let dining_option = load_dining_option(&session).await?;
    let view = CartView::build(&cart, dining_option, &state);

    let order_number = format!("ORD{:05}", chrono::Utc::now().timestamp() % 100_000);
    tracing::info!(order_number, total = %view.total, "Order placed");

    save_cart(&session, &Cart::new()).await?;

    Ok(CheckoutConfirmationTemplate {
        order_number,
        cart: view,
    }
    .into_response())
}
