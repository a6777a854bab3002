//! Authentication endpoints: login, registration, session check

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{CreateUser, User},
    AppState,
};

use super::MaybeUser;

/// Login form with username and password
#[derive(Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Successful login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// Signed session token
    pub token: String,
    /// Always "Bearer"
    pub token_type: String,
}

/// Authenticate and obtain a session token
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginForm,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Unknown user or incorrect password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> AppResult<Json<LoginResponse>> {
    let token = state.services.auth.login(&form.username, &form.password).await?;
    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
    }))
}

/// Register a new reader account
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(new_user): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.services.auth.register(new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Check whether the caller holds a valid session
#[utoipa::path(
    get,
    path = "/isLoggedIn",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Login status", body = bool)
    )
)]
pub async fn is_logged_in(MaybeUser(principal): MaybeUser) -> Json<bool> {
    Json(principal.is_some())
}
