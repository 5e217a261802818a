//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use masoro_core::types::{OrderStatus, Price};

use crate::filters;
use crate::middleware::RequireStaffAuth;
use crate::models::CurrentStaff;
use crate::state::AppState;

/// Staff view for the header.
#[derive(Debug, Clone)]
pub struct StaffView {
    pub display_name: String,
    pub role: String,
}

impl From<&CurrentStaff> for StaffView {
    fn from(staff: &CurrentStaff) -> Self {
        Self {
            display_name: staff.display_name.clone(),
            role: format!("{:?}", staff.role),
        }
    }
}

/// Dashboard metrics. Money values are grouped but carry no currency
/// prefix; the `money` filter adds it.
#[derive(Debug, Clone)]
pub struct DashboardMetrics {
    pub orders: String,
    pub revenue: String,
    pub menu_items: String,
    pub active_staff: String,
}

/// Recent order row for the dashboard table.
#[derive(Debug, Clone)]
pub struct RecentOrderView {
    pub id: String,
    pub customer_name: String,
    pub total: String,
    pub status: String,
    pub dining_option: String,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub staff: StaffView,
    pub current_path: String,
    pub metrics: DashboardMetrics,
    pub recent_orders: Vec<RecentOrderView>,
}

/// Number of orders on the recent-orders table.
const RECENT_ORDERS: usize = 5;

/// Display the dashboard.
#[instrument(skip(state, auth))]
pub async fn index(
    State(state): State<AppState>,
    auth: RequireStaffAuth,
) -> DashboardTemplate {
    let store = state.store();
    let orders = store.orders();

    // Cancelled orders do not count toward revenue.
    let revenue: Price = orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .map(|o| o.total)
        .sum();

    let menu = store.menu_items();
    let active_staff = store.staff().iter().filter(|s| s.is_active).count();

    let recent_orders = orders
        .iter()
        .take(RECENT_ORDERS)
        .map(|o| RecentOrderView {
            id: o.id.to_string(),
            customer_name: o.customer_name.clone(),
            total: o.total.to_string(),
            status: o.status.label().to_string(),
            dining_option: o.dining_option.label().to_string(),
        })
        .collect();

    DashboardTemplate {
        staff: StaffView::from(&auth.0),
        current_path: "/".to_string(),
        metrics: DashboardMetrics {
            orders: orders.len().to_string(),
            revenue: revenue.to_string(),
            menu_items: menu.len().to_string(),
            active_staff: active_staff.to_string(),
        },
        recent_orders,
    }
}
