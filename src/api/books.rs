//! Book management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{Book, BookInput},
    AppState,
};

/// Add a new book to the catalog
#[utoipa::path(
    post,
    path = "/book/add",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid book details"),
        (status = 409, description = "Duplicate ISBN")
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    Json(book): Json<BookInput>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.create(book).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Retrieve all books
#[utoipa::path(
    get,
    path = "/book/getAll",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn get_all_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    Ok(Json(state.services.books.get_all().await?))
}

/// Retrieve a book by ID
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book found", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    Ok(Json(state.services.books.get_by_id(id).await?))
}

/// Update a book's details
#[utoipa::path(
    put,
    path = "/book/update/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid book details"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "ISBN held by another book")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(book): Json<BookInput>,
) -> AppResult<Json<Book>> {
    Ok(Json(state.services.books.update(id, book).await?))
}

/// Delete a book from the catalog
#[utoipa::path(
    delete,
    path = "/book/delete/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
