//! Staff account management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use masoro_core::staff::{StaffAccount, StaffDraft};
use masoro_core::types::StaffRole;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireStaffAuth;
use crate::routes::dashboard::StaffView;
use crate::state::AppState;

/// Staff row for the table.
#[derive(Debug, Clone)]
pub struct StaffRowView {
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub is_active: bool,
    pub last_login: String,
}

impl From<&StaffAccount> for StaffRowView {
    fn from(account: &StaffAccount) -> Self {
        Self {
            username: account.username.clone(),
            display_name: account.display_name(),
            email: account.email.clone(),
            phone: account.phone.clone(),
            role: role_label(account.role).to_string(),
            is_active: account.is_active,
            last_login: account
                .last_login
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string()),
        }
    }
}

const fn role_label(role: StaffRole) -> &'static str {
    match role {
        StaffRole::Admin => "Admin",
        StaffRole::Manager => "Manager",
        StaffRole::Staff => "Staff",
    }
}

const fn role_slug(role: StaffRole) -> &'static str {
    match role {
        StaffRole::Admin => "admin",
        StaffRole::Manager => "manager",
        StaffRole::Staff => "staff",
    }
}

fn parse_role(slug: &str) -> Option<StaffRole> {
    match slug {
        "admin" => Some(StaffRole::Admin),
        "manager" => Some(StaffRole::Manager),
        "staff" => Some(StaffRole::Staff),
        _ => None,
    }
}

/// Form values for the new/edit form.
#[derive(Debug, Clone, Default)]
pub struct StaffFormView {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: String,
    pub security_question: String,
    pub security_answer: String,
    pub role: String,
    pub is_active: bool,
    pub first_name: String,
    pub last_name: String,
    /// The username field is read-only when editing.
    pub editing: bool,
}

impl From<&StaffAccount> for StaffFormView {
    fn from(account: &StaffAccount) -> Self {
        Self {
            username: account.username.clone(),
            password: account.password.clone(),
            email: account.email.clone(),
            phone: account.phone.clone(),
            security_question: account.security_question.clone(),
            security_answer: account.security_answer.clone(),
            role: role_slug(account.role).to_string(),
            is_active: account.is_active,
            first_name: account.first_name.clone().unwrap_or_default(),
            last_name: account.last_name.clone().unwrap_or_default(),
            editing: true,
        }
    }
}

/// Raw form input for create and update.
#[derive(Debug, Deserialize)]
pub struct StaffForm {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub security_question: String,
    #[serde(default)]
    pub security_answer: String,
    pub role: String,
    #[serde(default)]
    pub is_active: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl StaffForm {
    fn into_draft(self) -> std::result::Result<StaffDraft, String> {
        let role = parse_role(&self.role).ok_or_else(|| format!("unknown role '{}'", self.role))?;
        let none_if_empty = |s: String| {
            let s = s.trim().to_string();
            (!s.is_empty()).then_some(s)
        };
        Ok(StaffDraft {
            username: self.username.trim().to_string(),
            password: self.password,
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            security_question: self.security_question.trim().to_string(),
            security_answer: self.security_answer.trim().to_string(),
            role,
            is_active: self.is_active.is_some(),
            first_name: none_if_empty(self.first_name),
            last_name: none_if_empty(self.last_name),
        })
    }

    fn as_view(&self, editing: bool) -> StaffFormView {
        StaffFormView {
            username: self.username.clone(),
            password: self.password.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            security_question: self.security_question.clone(),
            security_answer: self.security_answer.clone(),
            role: self.role.clone(),
            is_active: self.is_active.is_some(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            editing,
        }
    }
}

/// Staff table template.
#[derive(Template, WebTemplate)]
#[template(path = "staff/index.html")]
pub struct StaffIndexTemplate {
    pub staff: StaffView,
    pub current_path: String,
    pub rows: Vec<StaffRowView>,
    pub current_username: String,
}

/// New/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "staff/form.html")]
pub struct StaffFormTemplate {
    pub staff: StaffView,
    pub current_path: String,
    pub heading: String,
    pub action: String,
    pub account: StaffFormView,
    pub error: Option<String>,
}

/// Display the staff table.
#[instrument(skip(state, auth))]
pub async fn index(State(state): State<AppState>, auth: RequireStaffAuth) -> StaffIndexTemplate {
    let rows = state.store().staff().iter().map(StaffRowView::from).collect();
    StaffIndexTemplate {
        current_username: auth.0.username.clone(),
        staff: StaffView::from(&auth.0),
        current_path: "/staff".to_string(),
        rows,
    }
}

/// Display the new account form.
#[instrument(skip(auth))]
pub async fn new_form(auth: RequireStaffAuth) -> StaffFormTemplate {
    StaffFormTemplate {
        staff: StaffView::from(&auth.0),
        current_path: "/staff".to_string(),
        heading: "New Staff Account".to_string(),
        action: "/staff".to_string(),
        account: StaffFormView {
            role: "staff".to_string(),
            is_active: true,
            ..StaffFormView::default()
        },
        error: None,
    }
}

/// Create a new account.
#[instrument(skip(state, auth, form))]
pub async fn create(
    State(state): State<AppState>,
    auth: RequireStaffAuth,
    Form(form): Form<StaffForm>,
) -> Result<Response> {
    let view = form.as_view(false);
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(message) => return Ok(form_with_error(&auth, "/staff", view, message)),
    };

    match state.store().add_staff(draft) {
        Ok(account) => {
            tracing::info!(username = %account.username, "Staff account created");
            Ok(Redirect::to("/staff").into_response())
        }
        Err(e) => Ok(form_with_error(&auth, "/staff", view, e.to_string())),
    }
}

/// Display the edit form for an account.
#[instrument(skip(state, auth))]
pub async fn edit_form(
    State(state): State<AppState>,
    auth: RequireStaffAuth,
    Path(username): Path<String>,
) -> Result<StaffFormTemplate> {
    let account = state
        .store()
        .staff_by_username(&username)
        .ok_or_else(|| AppError::NotFound(format!("staff account '{username}'")))?;

    Ok(StaffFormTemplate {
        staff: StaffView::from(&auth.0),
        current_path: "/staff".to_string(),
        heading: format!("Edit {}", account.display_name()),
        action: format!("/staff/{username}"),
        account: StaffFormView::from(&account),
        error: None,
    })
}

/// Update an existing account.
#[instrument(skip(state, auth, form))]
pub async fn update(
    State(state): State<AppState>,
    auth: RequireStaffAuth,
    Path(username): Path<String>,
    Form(form): Form<StaffForm>,
) -> Result<Response> {
    let action = format!("/staff/{username}");
    let view = form.as_view(true);
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(message) => return Ok(form_with_error(&auth, &action, view, message)),
    };

    match state.store().update_staff(&username, draft) {
        Ok(account) => {
            tracing::info!(username = %account.username, "Staff account updated");
            Ok(Redirect::to("/staff").into_response())
        }
        Err(e) => Ok(form_with_error(&auth, &action, view, e.to_string())),
    }
}

/// Delete an account. Deleting your own account is refused.
#[instrument(skip(state, auth))]
pub async fn delete(
    State(state): State<AppState>,
    auth: RequireStaffAuth,
    Path(username): Path<String>,
) -> Result<Redirect> {
    state.store().delete_staff(&username, &auth.0.username)?;
    tracing::info!(username, "Staff account deleted");
    Ok(Redirect::to("/staff"))
}

/// Toggle an account's active flag. Deactivating yourself is refused.
#[instrument(skip(state, auth))]
pub async fn toggle(
    State(state): State<AppState>,
    auth: RequireStaffAuth,
    Path(username): Path<String>,
) -> Result<Redirect> {
    let account = state
        .store()
        .toggle_staff_active(&username, &auth.0.username)?;
    tracing::info!(username, active = account.is_active, "Staff active flag toggled");
    Ok(Redirect::to("/staff"))
}

fn form_with_error(
    auth: &RequireStaffAuth,
    action: &str,
    account: StaffFormView,
    error: String,
) -> Response {
    StaffFormTemplate {
        staff: StaffView::from(&auth.0),
        current_path: "/staff".to_string(),
        heading: "Staff Account".to_string(),
        action: action.to_string(),
        account,
        error: Some(error),
    }
    .into_response()
}
