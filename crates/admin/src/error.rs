//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type for the admin console.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Session(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(err) => match err {
                StoreError::MenuItemNotFound(_)
                | StoreError::OrderNotFound(_)
                | StoreError::StaffNotFound(_) => StatusCode::NOT_FOUND,
                StoreError::DuplicateUsername(_) => StatusCode::CONFLICT,
                StoreError::SelfDelete
                | StoreError::SelfDeactivate
                | StoreError::InvalidMenuItem(_)
                | StoreError::InvalidStaff(_)
                | StoreError::InvalidOrder(_) => StatusCode::BAD_REQUEST,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Store(err) => err.to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use masoro_core::types::MenuItemId;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_store_error_status_codes() {
        assert_eq!(
            get_status(StoreError::MenuItemNotFound(MenuItemId::new(1)).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(StoreError::DuplicateUsername("x".to_owned()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(get_status(StoreError::SelfDelete.into()), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unauthorized_status() {
        assert_eq!(
            get_status(AppError::Unauthorized("login required".to_owned())),
            StatusCode::UNAUTHORIZED
        );
    }
}
