//! Book details repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book_detail::{BookDetail, Genre},
};

use super::map_unique_violation;

#[derive(Clone)]
pub struct BookDetailsRepository {
    pool: Pool<Postgres>,
}

impl BookDetailsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book detail by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BookDetail> {
        sqlx::query_as::<_, BookDetail>("SELECT * FROM book_details WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book detail with id {} not found", id)))
    }

    /// Get all book details
    pub async fn get_all(&self) -> AppResult<Vec<BookDetail>> {
        let details = sqlx::query_as::<_, BookDetail>("SELECT * FROM book_details ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(details)
    }

    /// Insert a new book detail
    pub async fn create(
        &self,
        book_id: i32,
        genre: Genre,
        summary: &str,
        cover_image_url: &str,
    ) -> AppResult<BookDetail> {
        sqlx::query_as::<_, BookDetail>(
            r#"
            INSERT INTO book_details (book_id, genre, summary, cover_image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(genre)
        .bind(summary)
        .bind(cover_image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(
                e,
                &format!("Duplicate detail for book {} and genre {}", book_id, genre),
            )
        })
    }

    /// Full-replace update of an existing book detail
    pub async fn update(
        &self,
        id: i32,
        book_id: i32,
        genre: Genre,
        summary: &str,
        cover_image_url: &str,
    ) -> AppResult<BookDetail> {
        sqlx::query_as::<_, BookDetail>(
            r#"
            UPDATE book_details
            SET book_id = $2, genre = $3, summary = $4, cover_image_url = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(book_id)
        .bind(genre)
        .bind(summary)
        .bind(cover_image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(
                e,
                &format!("Duplicate detail for book {} and genre {}", book_id, genre),
            )
        })?
        .ok_or_else(|| AppError::NotFound(format!("Book detail with id {} not found", id)))
    }

    /// Delete a book detail
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_details WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Book detail with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
