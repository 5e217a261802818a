//! Order management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use masoro_core::order::{Order, OrderDraft};
use masoro_core::types::{DiningOption, OrderId, OrderStatus};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireStaffAuth;
use crate::routes::dashboard::StaffView;
use crate::state::AppState;

/// Order row for the table.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub item_count: u32,
    pub summary: String,
    pub total: String,
    pub status: String,
    pub status_slug: String,
    pub dining_option: String,
    pub placed_at: String,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        let summary = order
            .lines
            .iter()
            .map(|l| format!("{}x {}", l.quantity, l.name))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            id: order.id.to_string(),
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            item_count: order.item_count(),
            summary,
            total: format!("RWF {}", order.total),
            status: order.status.label().to_string(),
            status_slug: order.status.to_string(),
            dining_option: order.dining_option.label().to_string(),
            placed_at: order.placed_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Status filter tab.
#[derive(Debug, Clone)]
pub struct StatusTab {
    pub slug: String,
    pub label: String,
    pub active: bool,
}

/// Order list query parameters.
#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    pub status: Option<String>,
}

/// Status change form.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Form values for the edit form.
#[derive(Debug, Clone)]
pub struct OrderFormView {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub customer_address: String,
    pub dining_option: String,
    pub table_number: String,
    pub payment_method: String,
    pub payment_status: String,
    pub estimated_time: String,
    pub notes: String,
}

impl OrderFormView {
    fn for_order(id: &OrderId, draft: &OrderDraft) -> Self {
        Self {
            id: id.to_string(),
            customer_name: draft.customer_name.clone(),
            customer_phone: draft.customer_phone.clone(),
            customer_email: draft.customer_email.clone(),
            customer_address: draft.customer_address.clone(),
            dining_option: draft.dining_option.to_string(),
            table_number: draft.table_number.clone(),
            payment_method: draft.payment_method.clone(),
            payment_status: draft.payment_status.clone(),
            estimated_time: draft.estimated_time.clone(),
            notes: draft.notes.clone(),
        }
    }
}

/// Raw edit form input.
#[derive(Debug, Deserialize)]
pub struct OrderForm {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_address: String,
    pub dining_option: String,
    #[serde(default)]
    pub table_number: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub notes: String,
}

impl OrderForm {
    fn into_draft(self) -> std::result::Result<OrderDraft, String> {
        let dining_option = self
            .dining_option
            .parse::<DiningOption>()
            .map_err(|_| format!("unknown dining option '{}'", self.dining_option))?;
        Ok(OrderDraft {
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_email: self.customer_email,
            customer_address: self.customer_address,
            dining_option,
            table_number: self.table_number,
            payment_method: self.payment_method,
            payment_status: self.payment_status,
            estimated_time: self.estimated_time,
            notes: self.notes,
        })
    }

    fn as_view(&self, id: &str) -> OrderFormView {
        OrderFormView {
            id: id.to_string(),
            customer_name: self.customer_name.clone(),
            customer_phone: self.customer_phone.clone(),
            customer_email: self.customer_email.clone(),
            customer_address: self.customer_address.clone(),
            dining_option: self.dining_option.clone(),
            table_number: self.table_number.clone(),
            payment_method: self.payment_method.clone(),
            payment_status: self.payment_status.clone(),
            estimated_time: self.estimated_time.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Order table template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub staff: StaffView,
    pub current_path: String,
    pub tabs: Vec<StatusTab>,
    pub rows: Vec<OrderRowView>,
    pub statuses: Vec<StatusTab>,
}

/// Display the order table, optionally filtered by status.
#[instrument(skip(state, auth))]
pub async fn index(
    State(state): State<AppState>,
    auth: RequireStaffAuth,
    Query(query): Query<OrderQuery>,
) -> OrdersIndexTemplate {
    let filter = query
        .status
        .as_deref()
        .and_then(|slug| slug.parse::<OrderStatus>().ok());

    let rows = state
        .store()
        .orders()
        .iter()
        .filter(|o| filter.is_none_or(|s| o.status == s))
        .map(OrderRowView::from)
        .collect();

    let active_slug = filter.map(|s| s.to_string()).unwrap_or_default();
    let mut tabs = vec![StatusTab {
        slug: String::new(),
        label: "All".to_string(),
        active: active_slug.is_empty(),
    }];
    tabs.extend(OrderStatus::ALL.iter().map(|s| StatusTab {
        slug: s.to_string(),
        label: s.label().to_string(),
        active: active_slug == s.to_string(),
    }));

    // Options for the per-row status select; none marked active.
    let statuses = OrderStatus::ALL
        .iter()
        .map(|s| StatusTab {
            slug: s.to_string(),
            label: s.label().to_string(),
            active: false,
        })
        .collect();

    OrdersIndexTemplate {
        staff: StaffView::from(&auth.0),
        current_path: "/orders".to_string(),
        tabs,
        rows,
        statuses,
    }
}

/// Edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/form.html")]
pub struct OrderFormTemplate {
    pub staff: StaffView,
    pub current_path: String,
    pub heading: String,
    pub action: String,
    pub order: OrderFormView,
    pub error: Option<String>,
}

/// Display the edit form for an order's customer fields.
#[instrument(skip(state, auth))]
pub async fn edit_form(
    State(state): State<AppState>,
    auth: RequireStaffAuth,
    Path(id): Path<String>,
) -> Result<OrderFormTemplate> {
    let order = state
        .store()
        .order(&OrderId::from(id.as_str()))
        .ok_or_else(|| AppError::NotFound(format!("order '{id}'")))?;

    Ok(OrderFormTemplate {
        staff: StaffView::from(&auth.0),
        current_path: "/orders".to_string(),
        heading: format!("Edit Order {}", order.id),
        action: format!("/orders/{id}"),
        order: OrderFormView::for_order(&order.id, &OrderDraft::from(&order)),
        error: None,
    })
}

/// Update an order's customer fields.
#[instrument(skip(state, auth, form))]
pub async fn update(
    State(state): State<AppState>,
    auth: RequireStaffAuth,
    Path(id): Path<String>,
    Form(form): Form<OrderForm>,
) -> Result<Response> {
    let action = format!("/orders/{id}");
    let view = form.as_view(&id);
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(message) => return Ok(form_with_error(&auth, &action, view, message)),
    };

    match state.store().update_order(&OrderId::from(id.as_str()), draft) {
        Ok(order) => {
            tracing::info!(id = %order.id, "Order updated");
            Ok(Redirect::to("/orders").into_response())
        }
        Err(e) => Ok(form_with_error(&auth, &action, view, e.to_string())),
    }
}

fn form_with_error(
    auth: &RequireStaffAuth,
    action: &str,
    order: OrderFormView,
    error: String,
) -> Response {
    OrderFormTemplate {
        staff: StaffView::from(&auth.0),
        current_path: "/orders".to_string(),
        heading: format!("Edit Order {}", order.id),
        action: action.to_string(),
        order,
        error: Some(error),
    }
    .into_response()
}

/// Change an order's status.
#[instrument(skip(state, _auth, form))]
pub async fn set_status(
    State(state): State<AppState>,
    _auth: RequireStaffAuth,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect> {
    let status: OrderStatus = form.status.parse().map_err(AppError::BadRequest)?;
    let order = state.store().set_order_status(&OrderId::from(id), status)?;
    tracing::info!(id = %order.id, status = %order.status, "Order status changed");
    Ok(Redirect::to("/orders"))
}

/// Delete an order.
#[instrument(skip(state, _auth))]
pub async fn delete(
    State(state): State<AppState>,
    _auth: RequireStaffAuth,
    Path(id): Path<String>,
) -> Result<Redirect> {
    state.store().delete_order(&OrderId::from(id.clone()))?;
    tracing::info!(id, "Order deleted");
    Ok(Redirect::to("/orders"))
}

/// Re-submit a copy of an order.
#[instrument(skip(state, _auth))]
pub async fn duplicate(
    State(state): State<AppState>,
    _auth: RequireStaffAuth,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let copy = state.store().duplicate_order(&OrderId::from(id.clone()))?;
    tracing::info!(source = id, copy = %copy.id, "Order duplicated");
    Ok(Redirect::to("/orders"))
}
