//! API handlers for Vellum REST endpoints

pub mod auth;
pub mod books;
pub mod health;
pub mod loans;
pub mod openapi;
pub mod users;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppError, AppState};

/// Name of the session cookie issued at login
pub const SESSION_COOKIE: &str = "vellum_session";

/// Plain acknowledgement body
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Extractor resolving the caller's identity from the session cookie.
///
/// Authentication happens here; role checks happen afterwards in the
/// handlers, so a missing session is always reported before a missing role.
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Internal("Failed to read cookies".to_string()))?;

        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| AppError::Authentication("Authentication required".to_string()))?;

        let user_id = state.services.auth.resolve_session(&token).await?;

        Ok(AuthenticatedUser { user_id, token })
    }
}
