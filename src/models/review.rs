//! Review model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Review model from database; one review per `(user_id, book_id)` pair
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: i32,
    pub book_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub review_date: NaiveDate,
}

/// Review payload for create and full-replace update
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReviewInput {
    pub book_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub review_date: NaiveDate,
}
