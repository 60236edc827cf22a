//! Error types for the Vellum server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body. Every failure shares the `{success: false, message}`
/// envelope the API promises.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            // State-precondition failures surface as 400, matching the
            // contract the browser front end was written against.
            AppError::Validation(msg) | AppError::Conflict(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_and_validation_map_to_bad_request() {
        let conflict = AppError::Conflict("taken".into()).into_response();
        assert_eq!(conflict.status(), StatusCode::BAD_REQUEST);

        let validation = AppError::Validation("too short".into()).into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn auth_errors_keep_401_403_split() {
        let authn = AppError::Authentication("no session".into()).into_response();
        assert_eq!(authn.status(), StatusCode::UNAUTHORIZED);

        let authz = AppError::Authorization("admin only".into()).into_response();
        assert_eq!(authz.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn internal_errors_hide_detail() {
        let response = AppError::Internal("pool exhausted at 10.0.0.3".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
