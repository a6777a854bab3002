//! Book detail endpoints (genre, summary, cover image)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book_detail::{BookDetail, BookDetailInput},
    AppState,
};

/// Add detail record for a book
#[utoipa::path(
    post,
    path = "/bookDetail/add",
    tag = "book-details",
    security(("bearer_auth" = [])),
    request_body = BookDetailInput,
    responses(
        (status = 201, description = "Detail created", body = BookDetail),
        (status = 400, description = "Invalid detail"),
        (status = 404, description = "Associated book not found"),
        (status = 409, description = "Detail already exists for book and genre")
    )
)]
pub async fn add_book_detail(
    State(state): State<AppState>,
    Json(detail): Json<BookDetailInput>,
) -> AppResult<(StatusCode, Json<BookDetail>)> {
    let detail = state.services.book_details.create(detail).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// Retrieve all book details
#[utoipa::path(
    get,
    path = "/bookDetail/getAll",
    tag = "book-details",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All book details", body = Vec<BookDetail>)
    )
)]
pub async fn get_all_book_details(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BookDetail>>> {
    Ok(Json(state.services.book_details.get_all().await?))
}

/// Retrieve a book detail by ID
#[utoipa::path(
    get,
    path = "/bookDetail/{id}",
    tag = "book-details",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Detail ID")),
    responses(
        (status = 200, description = "Detail found", body = BookDetail),
        (status = 404, description = "Detail not found")
    )
)]
pub async fn get_book_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetail>> {
    Ok(Json(state.services.book_details.get_by_id(id).await?))
}

/// Update a book detail
#[utoipa::path(
    put,
    path = "/bookDetail/update/{id}",
    tag = "book-details",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Detail ID")),
    request_body = BookDetailInput,
    responses(
        (status = 200, description = "Detail updated", body = BookDetail),
        (status = 400, description = "Invalid detail"),
        (status = 404, description = "Detail not found"),
        (status = 409, description = "Detail already exists for book and genre")
    )
)]
pub async fn update_book_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(detail): Json<BookDetailInput>,
) -> AppResult<Json<BookDetail>> {
    Ok(Json(state.services.book_details.update(id, detail).await?))
}

/// Delete a book detail
#[utoipa::path(
    delete,
    path = "/bookDetail/delete/{id}",
    tag = "book-details",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Detail ID")),
    responses(
        (status = 204, description = "Detail deleted"),
        (status = 404, description = "Detail not found")
    )
)]
pub async fn delete_book_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.book_details.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
