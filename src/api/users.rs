//! User management endpoints (admin only)

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{ResetPassword, UpdateUser, UserInfo},
};

use super::{AuthenticatedUser, MessageResponse};

/// User list response
#[derive(Serialize, ToSchema)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<UserInfo>,
}

/// Single user response
#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    pub user: UserInfo,
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "List of users", body = UsersResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    identity: AuthenticatedUser,
) -> AppResult<Json<UsersResponse>> {
    state.services.auth.require_admin(identity.user_id).await?;

    let users = state.services.users.list_users().await?;

    Ok(Json(UsersResponse {
        success: true,
        users,
    }))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    identity: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    state.services.auth.require_admin(identity.user_id).await?;

    let user = state.services.users.get_user(id).await?;

    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// Update a user's name, email and role
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Email already in use"),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    identity: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(update): Json<UpdateUser>,
) -> AppResult<Json<MessageResponse>> {
    state.services.auth.require_admin(identity.user_id).await?;

    state.services.users.update_user(id, update).await?;

    Ok(Json(MessageResponse::ok("User updated successfully")))
}

/// Delete a user and their closed loan history
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Self-delete or user has active loans"),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    identity: AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.auth.require_admin(identity.user_id).await?;

    state
        .services
        .users
        .delete_user(identity.user_id, id)
        .await?;

    Ok(Json(MessageResponse::ok("User deleted successfully")))
}

/// Reset a user's password
#[utoipa::path(
    post,
    path = "/users/{id}/reset-password",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = ResetPassword,
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 400, description = "Password too short"),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn reset_password(
    State(state): State<crate::AppState>,
    identity: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<ResetPassword>,
) -> AppResult<Json<MessageResponse>> {
    state.services.auth.require_admin(identity.user_id).await?;

    state.services.users.reset_password(id, request).await?;

    Ok(Json(MessageResponse::ok("Password reset successfully")))
}
