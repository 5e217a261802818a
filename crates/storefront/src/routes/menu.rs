//! Menu route handlers.
//!
//! The menu page filters by category and search term. The grid itself is
//! an HTMX fragment so filter changes swap only the item cards.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use masoro_core::catalog::{Category, MenuItem};
use masoro_core::pricing::effective_price;

use crate::error::Result;
use crate::filters;
use crate::models::session::load_cart;
use crate::state::AppState;

/// Menu item display data for templates.
#[derive(Clone)]
pub struct MenuItemView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Price the visitor pays right now, grouped but without the currency
    /// prefix (the `money` filter adds it).
    pub price: String,
    /// Regular price, shown struck through when happy hour applies.
    pub regular_price: Option<String>,
    pub happy_hour: bool,
    pub rating: String,
    pub prep_time: String,
    pub popular: bool,
    pub spicy: bool,
    pub available: bool,
    /// Units of this item already in the visitor's cart.
    pub in_cart: u32,
}

impl MenuItemView {
    /// Build the display view, applying happy hour pricing when active.
    #[must_use]
    pub fn build(item: &MenuItem, happy_hour_active: bool, in_cart: u32) -> Self {
        let effective = effective_price(item, happy_hour_active);
        let discounted = effective != item.price;
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            description: item.description.clone(),
            image: item.image.clone(),
            price: effective.to_string(),
            regular_price: discounted.then(|| item.price.to_string()),
            happy_hour: discounted,
            rating: format!("{:.1}", item.rating),
            prep_time: item.prep_time.clone(),
            popular: item.popular,
            spicy: item.spicy,
            available: item.available,
            in_cart,
        }
    }
}

/// Category tab display data.
#[derive(Clone)]
pub struct CategoryView {
    pub slug: String,
    pub label: String,
    pub active: bool,
}

/// Menu filter query parameters.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu/index.html")]
pub struct MenuIndexTemplate {
    pub categories: Vec<CategoryView>,
    pub items: Vec<MenuItemView>,
    pub search: String,
    pub happy_hour_active: bool,
}

/// Menu grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/menu_grid.html")]
pub struct MenuGridTemplate {
    pub items: Vec<MenuItemView>,
}

/// Resolve the filtered item views for a query.
async fn filtered_items(
    state: &AppState,
    session: &Session,
    query: &MenuQuery,
) -> Result<Vec<MenuItemView>> {
    let cart = load_cart(session).await?;
    let happy_hour = state.happy_hour_active();
    let category = query
        .category
        .as_deref()
        .and_then(|slug| slug.parse::<Category>().ok());
    let term = query.q.as_deref().unwrap_or("").trim();

    let items = state
        .catalog()
        .iter()
        .filter(|item| category.is_none_or(|c| item.category == c))
        .filter(|item| term.is_empty() || item.matches_search(term))
        .map(|item| MenuItemView::build(item, happy_hour, cart.quantity_of(item.id)))
        .collect();
    Ok(items)
}

/// Display the menu page.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<MenuQuery>,
) -> Result<impl IntoResponse> {
    let items = filtered_items(&state, &session, &query).await?;

    let active_slug = query.category.clone().unwrap_or_default();
    let mut categories = vec![CategoryView {
        slug: String::new(),
        label: "All".to_string(),
        active: active_slug.is_empty(),
    }];
    categories.extend(Category::ALL.iter().map(|c| CategoryView {
        slug: c.to_string(),
        label: c.label().to_string(),
        active: active_slug == c.to_string(),
    }));

    Ok(MenuIndexTemplate {
        categories,
        items,
        search: query.q.unwrap_or_default(),
        happy_hour_active: state.happy_hour_active(),
    })
}

/// Menu grid fragment (HTMX).
#[instrument(skip(state, session))]
pub async fn grid(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<MenuQuery>,
) -> Result<impl IntoResponse> {
    let items = filtered_items(&state, &session, &query).await?;
    Ok(MenuGridTemplate { items })
}
