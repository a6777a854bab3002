//! User management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::user::{CreateUser, UpdateUser, User},
    AppState,
};

use super::CurrentUser;

/// Get the authenticated caller's user ID
#[utoipa::path(
    get,
    path = "/user/current",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user's ID", body = i32),
        (status = 404, description = "Token subject no longer exists")
    )
)]
pub async fn get_current_user_id(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
) -> AppResult<Json<i32>> {
    let user = state.services.users.get_by_username(&principal.subject).await?;
    Ok(Json(user.id))
}

/// Get the number of loans a user has ever taken
#[utoipa::path(
    get,
    path = "/user/{id}/loanCount",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Loan count for the user", body = i64),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_loan_count(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<i64>> {
    Ok(Json(state.services.users.loan_count(id).await?))
}

/// Add a new user
#[utoipa::path(
    post,
    path = "/user/add",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn add_user(
    State(state): State<AppState>,
    Json(user): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.services.users.create(user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Retrieve all users
#[utoipa::path(
    get,
    path = "/user/getAll",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = Vec<User>)
    )
)]
pub async fn get_all_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.services.users.get_all().await?))
}

/// Retrieve a user by ID
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<User>> {
    Ok(Json(state.services.users.get_by_id(id).await?))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/user/update/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username taken by another user")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(user): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    Ok(Json(state.services.users.update(id, user).await?))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/user/delete/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
