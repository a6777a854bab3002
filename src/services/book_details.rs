//! Book detail management service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::book_detail::{BookDetail, BookDetailInput, Genre},
    repository::Repository,
    validation::{book_detail::validate_book_detail, first_violation, CoverProbe},
};

#[derive(Clone)]
pub struct BookDetailsService {
    repository: Repository,
    probe: Arc<dyn CoverProbe + Send + Sync>,
}

impl BookDetailsService {
    pub fn new(repository: Repository, probe: Arc<dyn CoverProbe + Send + Sync>) -> Self {
        Self { repository, probe }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<BookDetail> {
        self.repository.book_details.get_by_id(id).await
    }

    pub async fn get_all(&self) -> AppResult<Vec<BookDetail>> {
        self.repository.book_details.get_all().await
    }

    /// Validate and insert a new book detail
    pub async fn create(&self, detail: BookDetailInput) -> AppResult<BookDetail> {
        let errors =
            validate_book_detail(&detail, None, &self.repository, self.probe.as_ref()).await?;
        first_violation(errors)?;

        let genre = parse_genre(&detail.genre)?;
        self.repository
            .book_details
            .create(detail.book_id, genre, &detail.summary, &detail.cover_image_url)
            .await
    }

    /// Validate and full-replace an existing book detail
    pub async fn update(&self, id: i32, detail: BookDetailInput) -> AppResult<BookDetail> {
        self.repository.book_details.get_by_id(id).await?;

        let errors =
            validate_book_detail(&detail, Some(id), &self.repository, self.probe.as_ref()).await?;
        first_violation(errors)?;

        let genre = parse_genre(&detail.genre)?;
        self.repository
            .book_details
            .update(id, detail.book_id, genre, &detail.summary, &detail.cover_image_url)
            .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.book_details.delete(id).await
    }
}

/// The validator has already vetted the genre; this converts it for storage.
fn parse_genre(raw: &str) -> AppResult<Genre> {
    raw.parse::<Genre>()
        .map_err(|e| AppError::Validation(e))
}
