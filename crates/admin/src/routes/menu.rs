//! Menu management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use masoro_core::catalog::{Category, MenuItem, MenuItemDraft};
use masoro_core::types::{MenuItemId, Price};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireStaffAuth;
use crate::routes::dashboard::StaffView;
use crate::state::AppState;

/// Menu item row for the table.
#[derive(Debug, Clone)]
pub struct MenuRowView {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub price: String,
    pub happy_hour_price: Option<String>,
    pub available: bool,
    pub popular: bool,
    pub sold_count: u32,
    /// Margin over ingredient cost, when a cost is recorded.
    pub margin: Option<String>,
}

impl From<&MenuItem> for MenuRowView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            category: item.category.label().to_string(),
            price: format!("RWF {}", item.price),
            happy_hour_price: item.happy_hour_price.map(|p| format!("RWF {p}")),
            available: item.available,
            popular: item.popular,
            sold_count: item.sold_count,
            margin: item.cost.map(|cost| {
                let margin = item.price.amount() - cost.amount();
                format!("RWF {}", Price::new(margin))
            }),
        }
    }
}

/// Form values, all strings so a failed submit can be re-rendered as-is.
#[derive(Debug, Clone, Default)]
pub struct MenuFormView {
    pub name: String,
    pub description: String,
    pub price: String,
    pub happy_hour_price: String,
    pub image: String,
    pub category: String,
    pub rating: String,
    pub prep_time: String,
    pub popular: bool,
    pub spicy: bool,
    pub available: bool,
    pub calories: String,
    pub ingredients: String,
    pub allergens: String,
    pub cost: String,
}

impl From<&MenuItem> for MenuFormView {
    fn from(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.amount().to_string(),
            happy_hour_price: item
                .happy_hour_price
                .map(|p| p.amount().to_string())
                .unwrap_or_default(),
            image: item.image.clone(),
            category: item.category.to_string(),
            rating: format!("{:.1}", item.rating),
            prep_time: item.prep_time.clone(),
            popular: item.popular,
            spicy: item.spicy,
            available: item.available,
            calories: item.calories.map(|c| c.to_string()).unwrap_or_default(),
            ingredients: item.ingredients.join(", "),
            allergens: item.allergens.join(", "),
            cost: item
                .cost
                .map(|c| c.amount().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Category option for the form's select element.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub slug: String,
    pub label: String,
}

fn category_options() -> Vec<CategoryOption> {
    Category::ALL
        .into_iter()
        .map(|c| CategoryOption {
            slug: c.to_string(),
            label: c.label().to_string(),
        })
        .collect()
}

/// Raw form input for create and update.
#[derive(Debug, Deserialize)]
pub struct MenuItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub happy_hour_price: String,
    #[serde(default)]
    pub image: String,
    pub category: String,
    pub rating: String,
    pub prep_time: String,
    // Checkboxes are absent from the form body when unchecked.
    #[serde(default)]
    pub popular: Option<String>,
    #[serde(default)]
    pub spicy: Option<String>,
    #[serde(default)]
    pub available: Option<String>,
    #[serde(default)]
    pub calories: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub allergens: String,
    #[serde(default)]
    pub cost: String,
}

impl MenuItemForm {
    /// Parse the raw strings into a draft.
    fn into_draft(self) -> std::result::Result<MenuItemDraft, String> {
        let price = parse_rwf(&self.price).ok_or("price must be a whole RWF amount")?;
        let happy_hour_price = match self.happy_hour_price.trim() {
            "" => None,
            s => Some(parse_rwf(s).ok_or("happy hour price must be a whole RWF amount")?),
        };
        let category = self
            .category
            .parse::<Category>()
            .map_err(|_| format!("unknown category '{}'", self.category))?;
        let rating = self
            .rating
            .trim()
            .parse::<f32>()
            .map_err(|_| "rating must be a number".to_string())?;
        let calories = match self.calories.trim() {
            "" => None,
            s => Some(s.parse::<u32>().map_err(|_| "calories must be a whole number")?),
        };
        let cost = match self.cost.trim() {
            "" => None,
            s => Some(parse_rwf(s).ok_or("cost must be a whole RWF amount")?),
        };

        let image = if self.image.trim().is_empty() {
            masoro_core::seed::PLACEHOLDER_IMAGE.to_string()
        } else {
            self.image.trim().to_string()
        };

        Ok(MenuItemDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            happy_hour_price,
            image,
            category,
            rating,
            prep_time: self.prep_time.trim().to_string(),
            popular: self.popular.is_some(),
            spicy: self.spicy.is_some(),
            available: self.available.is_some(),
            calories,
            ingredients: split_list(&self.ingredients),
            allergens: split_list(&self.allergens),
            cost,
        })
    }

    fn as_view(&self) -> MenuFormView {
        MenuFormView {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price.clone(),
            happy_hour_price: self.happy_hour_price.clone(),
            image: self.image.clone(),
            category: self.category.clone(),
            rating: self.rating.clone(),
            prep_time: self.prep_time.clone(),
            popular: self.popular.is_some(),
            spicy: self.spicy.is_some(),
            available: self.available.is_some(),
            calories: self.calories.clone(),
            ingredients: self.ingredients.clone(),
            allergens: self.allergens.clone(),
            cost: self.cost.clone(),
        }
    }
}

fn parse_rwf(s: &str) -> Option<Price> {
    s.trim().parse::<i64>().ok().map(Price::from_rwf)
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Search and category filter for the menu table.
#[derive(Debug, Deserialize)]
pub struct MenuListQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

/// Menu table template.
#[derive(Template, WebTemplate)]
#[template(path = "menu/index.html")]
pub struct MenuIndexTemplate {
    pub staff: StaffView,
    pub current_path: String,
    pub rows: Vec<MenuRowView>,
    pub query: String,
    pub category_filter: String,
    pub categories: Vec<CategoryOption>,
}

/// New/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "menu/form.html")]
pub struct MenuFormTemplate {
    pub staff: StaffView,
    pub current_path: String,
    pub heading: String,
    /// Where the form posts to.
    pub action: String,
    pub item: MenuFormView,
    pub categories: Vec<CategoryOption>,
    pub error: Option<String>,
}

/// Display the menu item table, optionally narrowed by search term and
/// category.
#[instrument(skip(state, auth))]
pub async fn index(
    State(state): State<AppState>,
    auth: RequireStaffAuth,
    Query(params): Query<MenuListQuery>,
) -> MenuIndexTemplate {
    let query = params.q.unwrap_or_default();
    let category_filter = params.category.unwrap_or_default();
    let category = category_filter.parse::<Category>().ok();

    let term = query.trim();
    let rows = state
        .store()
        .menu_items()
        .iter()
        .filter(|item| term.is_empty() || item.matches_search(term))
        .filter(|item| category.is_none_or(|c| item.category == c))
        .map(MenuRowView::from)
        .collect();

    MenuIndexTemplate {
        staff: StaffView::from(&auth.0),
        current_path: "/menu".to_string(),
        rows,
        query,
        category_filter,
        categories: category_options(),
    }
}

/// Display the new item form.
#[instrument(skip(auth))]
pub async fn new_form(auth: RequireStaffAuth) -> MenuFormTemplate {
    MenuFormTemplate {
        staff: StaffView::from(&auth.0),
        current_path: "/menu".to_string(),
        heading: "New Menu Item".to_string(),
        action: "/menu".to_string(),
        item: MenuFormView {
            available: true,
            rating: "4.0".to_string(),
            ..MenuFormView::default()
        },
        categories: category_options(),
        error: None,
    }
}

/// Create a new menu item.
#[instrument(skip(state, auth, form))]
pub async fn create(
    State(state): State<AppState>,
    auth: RequireStaffAuth,
    Form(form): Form<MenuItemForm>,
) -> Result<Response> {
    let view = form.as_view();
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(message) => return Ok(form_with_error(&auth, "/menu", view, message)),
    };

    match state.store().add_menu_item(draft) {
        Ok(item) => {
            tracing::info!(id = %item.id, name = %item.name, "Menu item created");
            Ok(Redirect::to("/menu").into_response())
        }
        Err(e) => Ok(form_with_error(&auth, "/menu", view, e.to_string())),
    }
}

/// Display the edit form for an item.
#[instrument(skip(state, auth))]
pub async fn edit_form(
    State(state): State<AppState>,
    auth: RequireStaffAuth,
    Path(id): Path<i32>,
) -> Result<MenuFormTemplate> {
    let id = MenuItemId::new(id);
    let item = state
        .store()
        .menu_item(id)
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))?;

    Ok(MenuFormTemplate {
        staff: StaffView::from(&auth.0),
        current_path: "/menu".to_string(),
        heading: format!("Edit {}", item.name),
        action: format!("/menu/{id}"),
        item: MenuFormView::from(&item),
        categories: category_options(),
        error: None,
    })
}

/// Update an existing item.
#[instrument(skip(state, auth, form))]
pub async fn update(
    State(state): State<AppState>,
    auth: RequireStaffAuth,
    Path(id): Path<i32>,
    Form(form): Form<MenuItemForm>,
) -> Result<Response> {
    let id = MenuItemId::new(id);
    let action = format!("/menu/{id}");
    let view = form.as_view();
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(message) => return Ok(form_with_error(&auth, &action, view, message)),
    };

    match state.store().update_menu_item(id, draft) {
        Ok(item) => {
            tracing::info!(id = %item.id, name = %item.name, "Menu item updated");
            Ok(Redirect::to("/menu").into_response())
        }
        Err(e) => Ok(form_with_error(&auth, &action, view, e.to_string())),
    }
}

/// Delete an item.
#[instrument(skip(state, _auth))]
pub async fn delete(
    State(state): State<AppState>,
    _auth: RequireStaffAuth,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    state.store().delete_menu_item(MenuItemId::new(id))?;
    tracing::info!(id, "Menu item deleted");
    Ok(Redirect::to("/menu"))
}

/// Toggle an item's availability.
#[instrument(skip(state, _auth))]
pub async fn toggle(
    State(state): State<AppState>,
    _auth: RequireStaffAuth,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    let item = state.store().toggle_availability(MenuItemId::new(id))?;
    tracing::info!(id, available = item.available, "Menu item availability toggled");
    Ok(Redirect::to("/menu"))
}

/// Duplicate an item.
#[instrument(skip(state, _auth))]
pub async fn duplicate(
    State(state): State<AppState>,
    _auth: RequireStaffAuth,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    let copy = state.store().duplicate_menu_item(MenuItemId::new(id))?;
    tracing::info!(source = id, copy = %copy.id, "Menu item duplicated");
    Ok(Redirect::to("/menu"))
}

fn form_with_error(
    auth: &RequireStaffAuth,
    action: &str,
    item: MenuFormView,
    error: String,
) -> Response {
    MenuFormTemplate {
        staff: StaffView::from(&auth.0),
        current_path: "/menu".to_string(),
        heading: "Menu Item".to_string(),
        action: action.to_string(),
        item,
        categories: category_options(),
        error: Some(error),
    }
    .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> MenuItemForm {
        MenuItemForm {
            name: "Agatogo".to_owned(),
            description: "Plantain stew".to_owned(),
            price: "4000".to_owned(),
            happy_hour_price: String::new(),
            image: String::new(),
            category: "sides".to_owned(),
            rating: "4.2".to_owned(),
            prep_time: "20-25 min".to_owned(),
            popular: None,
            spicy: Some("on".to_owned()),
            available: Some("on".to_owned()),
            calories: "520".to_owned(),
            ingredients: "plantain, beef, celery".to_owned(),
            allergens: String::new(),
            cost: String::new(),
        }
    }

    #[test]
    fn test_form_parses_into_draft() {
        let draft = form().into_draft().unwrap();
        assert_eq!(draft.price, Price::from_rwf(4000));
        assert_eq!(draft.happy_hour_price, None);
        assert_eq!(draft.category, Category::Sides);
        assert!(draft.spicy);
        assert!(!draft.popular);
        assert_eq!(draft.ingredients, vec!["plantain", "beef", "celery"]);
        assert_eq!(draft.calories, Some(520));
    }

    #[test]
    fn test_form_rejects_bad_price() {
        let mut f = form();
        f.price = "a lot".to_owned();
        assert!(f.into_draft().is_err());
    }

    #[test]
    fn test_empty_image_falls_back_to_placeholder() {
        let draft = form().into_draft().unwrap();
        assert_eq!(draft.image, masoro_core::seed::PLACEHOLDER_IMAGE);
    }
}
