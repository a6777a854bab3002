//! Loan management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::loan::{Loan, LoanInput},
    AppState,
};

/// Borrow a book
#[utoipa::path(
    post,
    path = "/loan/add",
    tag = "loans",
    security(("bearer_auth" = [])),
    request_body = LoanInput,
    responses(
        (status = 201, description = "Loan created", body = Loan),
        (status = 400, description = "Invalid loan dates"),
        (status = 404, description = "Book or user not found"),
        (status = 409, description = "Book not available for loan")
    )
)]
pub async fn add_loan(
    State(state): State<AppState>,
    Json(loan): Json<LoanInput>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let loan = state.services.loans.create(loan).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Retrieve all loans
#[utoipa::path(
    get,
    path = "/loan/getAll",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All loans", body = Vec<Loan>)
    )
)]
pub async fn get_all_loans(State(state): State<AppState>) -> AppResult<Json<Vec<Loan>>> {
    Ok(Json(state.services.loans.get_all().await?))
}

/// Retrieve a loan by ID
#[utoipa::path(
    get,
    path = "/loan/{id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Loan found", body = Loan),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_loan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Loan>> {
    Ok(Json(state.services.loans.get_by_id(id).await?))
}

/// Retrieve all loans of one user
#[utoipa::path(
    get,
    path = "/loan/user/{user_id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User's loans", body = Vec<Loan>),
        (status = 404, description = "No loans for this user")
    )
)]
pub async fn get_user_loans(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<Loan>>> {
    Ok(Json(state.services.loans.get_user_loans(user_id).await?))
}

/// Update a loan (full replace)
#[utoipa::path(
    put,
    path = "/loan/update/{id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    request_body = LoanInput,
    responses(
        (status = 200, description = "Loan updated", body = Loan),
        (status = 400, description = "Invalid loan dates"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn update_loan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(loan): Json<LoanInput>,
) -> AppResult<Json<Loan>> {
    Ok(Json(state.services.loans.update(id, loan).await?))
}

/// Return a borrowed book (sets today's date as return date)
#[utoipa::path(
    put,
    path = "/loan/return/{id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Book returned", body = Loan),
        (status = 400, description = "Return date before loan date"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn return_loan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Loan>> {
    Ok(Json(state.services.loans.return_loan(id).await?))
}

/// Delete a loan record
#[utoipa::path(
    delete,
    path = "/loan/delete/{id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 204, description = "Loan deleted"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn delete_loan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.loans.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
