//! Review management service

use crate::{
    error::AppResult,
    models::review::{Review, ReviewInput},
    repository::Repository,
    validation::{first_violation, review::validate_review},
};

#[derive(Clone)]
pub struct ReviewsService {
    repository: Repository,
}

impl ReviewsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Review> {
        self.repository.reviews.get_by_id(id).await
    }

    pub async fn get_all(&self) -> AppResult<Vec<Review>> {
        self.repository.reviews.get_all().await
    }

    /// Validate and insert a new review
    pub async fn create(&self, review: ReviewInput) -> AppResult<Review> {
        let errors = validate_review(&review, None, &self.repository).await?;
        first_violation(errors)?;
        self.repository.reviews.create(&review).await
    }

    /// Validate and full-replace an existing review
    pub async fn update(&self, id: i32, review: ReviewInput) -> AppResult<Review> {
        self.repository.reviews.get_by_id(id).await?;

        let errors = validate_review(&review, Some(id), &self.repository).await?;
        first_violation(errors)?;
        self.repository.reviews.update(id, &review).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.reviews.delete(id).await
    }
}
