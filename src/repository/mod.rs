//! Repository layer for database operations
//!
//! All uniqueness invariants (isbn, username, `(book_id, genre)`,
//! `(user_id, book_id)` reviews, one open loan per book) are backed by
//! database constraints; the validators' existence checks only exist for
//! better error messages. A constraint violation from a racing writer is
//! mapped to a 409 here.

pub mod book_details;
pub mod books;
pub mod loans;
pub mod reviews;
pub mod users;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book_detail::Genre,
    validation::ValidationStore,
};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub book_details: book_details::BookDetailsRepository,
    pub loans: loans::LoansRepository,
    pub reviews: reviews::ReviewsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            book_details: book_details::BookDetailsRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone()),
            reviews: reviews::ReviewsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Translate a storage-level unique violation into the conflict the
/// application-level check would have reported, and pass everything else
/// through as a database error.
pub(crate) fn map_unique_violation(err: sqlx::Error, conflict: &str) -> AppError {
    let is_unique = err
        .as_database_error()
        .map(|db| db.kind() == sqlx::error::ErrorKind::UniqueViolation)
        .unwrap_or(false);
    if is_unique {
        AppError::Conflict(conflict.to_string())
    } else {
        AppError::Database(err)
    }
}

#[async_trait]
impl ValidationStore for Repository {
    async fn book_exists(&self, book_id: i32) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(book_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn user_exists(&self, user_id: i32) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn book_id_with_isbn(&self, isbn: &str) -> AppResult<Option<i32>> {
        let id = sqlx::query_scalar::<_, i32>("SELECT id FROM books WHERE isbn = $1")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    async fn detail_id_for(&self, book_id: i32, genre: Genre) -> AppResult<Option<i32>> {
        let id = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM book_details WHERE book_id = $1 AND genre = $2",
        )
        .bind(book_id)
        .bind(genre)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    async fn review_id_for(&self, user_id: i32, book_id: i32) -> AppResult<Option<i32>> {
        let id = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM reviews WHERE user_id = $1 AND book_id = $2",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }
}
