//! Review endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::review::{Review, ReviewInput},
    AppState,
};

/// Add a review for a book
#[utoipa::path(
    post,
    path = "/review/add",
    tag = "reviews",
    security(("bearer_auth" = [])),
    request_body = ReviewInput,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Rating out of range"),
        (status = 404, description = "Book or user not found"),
        (status = 409, description = "User already reviewed this book")
    )
)]
pub async fn add_review(
    State(state): State<AppState>,
    Json(review): Json<ReviewInput>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let review = state.services.reviews.create(review).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Retrieve all reviews
#[utoipa::path(
    get,
    path = "/review/getAll",
    tag = "reviews",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All reviews", body = Vec<Review>)
    )
)]
pub async fn get_all_reviews(State(state): State<AppState>) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(state.services.reviews.get_all().await?))
}

/// Retrieve a review by ID
#[utoipa::path(
    get,
    path = "/review/{id}",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review found", body = Review),
        (status = 404, description = "Review not found")
    )
)]
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Review>> {
    Ok(Json(state.services.reviews.get_by_id(id).await?))
}

/// Update a review (full replace)
#[utoipa::path(
    put,
    path = "/review/update/{id}",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Review ID")),
    request_body = ReviewInput,
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 400, description = "Rating out of range"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(review): Json<ReviewInput>,
) -> AppResult<Json<Review>> {
    Ok(Json(state.services.reviews.update(id, review).await?))
}

/// Delete a review
#[utoipa::path(
    delete,
    path = "/review/delete/{id}",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.reviews.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
