//! Registration, login and logout endpoints

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{Credentials, RegisterUser, UserInfo},
};

use super::{AuthenticatedUser, MessageResponse, SESSION_COOKIE};

/// Registration response
#[derive(Serialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    /// ID of the newly created user
    pub user_id: i32,
}

/// Login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserInfo,
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid input or email already registered")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let user_id = state.services.auth.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            user_id,
        }),
    ))
}

/// Log in and establish a session
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Session established", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    jar: CookieJar,
    Json(credentials): Json<Credentials>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let (token, user) = state.services.auth.login(&credentials).await?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            success: true,
            user,
        }),
    ))
}

/// Log out and discard the session
#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(
    State(state): State<crate::AppState>,
    identity: AuthenticatedUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<MessageResponse>)> {
    state.services.auth.logout(&identity.token).await?;

    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());

    Ok((jar, Json(MessageResponse::ok("Logged out successfully"))))
}
