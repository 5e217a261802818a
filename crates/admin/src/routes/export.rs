//! JSON export route handlers.
//!
//! Each endpoint snapshots one slice of the store and serves it as a
//! pretty-printed JSON attachment, named with the current date.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireStaffAuth;
use crate::state::AppState;

/// Serialize a snapshot into a downloadable JSON attachment.
fn json_download<T: Serialize>(kind: &str, value: &T) -> Result<Response> {
    let body = serde_json::to_vec_pretty(value)
        .map_err(|e| AppError::Internal(format!("export serialization failed: {e}")))?;
    let filename = format!("{kind}-{}.json", Utc::now().format("%Y-%m-%d"));

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response())
}

/// Download the menu as JSON.
#[instrument(skip(state, _auth))]
pub async fn menu(State(state): State<AppState>, _auth: RequireStaffAuth) -> Result<Response> {
    json_download("menu", &state.store().menu_items())
}

/// Download all orders as JSON.
#[instrument(skip(state, _auth))]
pub async fn orders(State(state): State<AppState>, _auth: RequireStaffAuth) -> Result<Response> {
    json_download("orders", &state.store().orders())
}

/// Download staff accounts as JSON.
#[instrument(skip(state, _auth))]
pub async fn staff(State(state): State<AppState>, _auth: RequireStaffAuth) -> Result<Response> {
    json_download("staff", &state.store().staff())
}

/// Download restaurant settings as JSON. Wrapped in a one-element array so
/// every export shares the same top-level shape.
#[instrument(skip(state, _auth))]
pub async fn settings(State(state): State<AppState>, _auth: RequireStaffAuth) -> Result<Response> {
    json_download("settings", &[state.store().settings()])
}
