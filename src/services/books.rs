//! Book management service

use chrono::{Datelike, Utc};

use crate::{
    error::AppResult,
    models::book::{Book, BookInput},
    repository::Repository,
    validation::{book::validate_book, first_violation},
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn get_all(&self) -> AppResult<Vec<Book>> {
        self.repository.books.get_all().await
    }

    /// Validate and insert a new book
    pub async fn create(&self, book: BookInput) -> AppResult<Book> {
        let errors =
            validate_book(&book, None, Utc::now().year(), &self.repository).await?;
        first_violation(errors)?;

        tracing::info!(isbn = %book.isbn, "adding book");
        self.repository.books.create(&book).await
    }

    /// Validate and full-replace an existing book.
    ///
    /// The book keeping its own ISBN is not a duplicate of itself.
    pub async fn update(&self, id: i32, book: BookInput) -> AppResult<Book> {
        // Missing rows outrank invalid payloads: 404 before 400
        self.repository.books.get_by_id(id).await?;

        let errors =
            validate_book(&book, Some(id), Utc::now().year(), &self.repository).await?;
        first_violation(errors)?;

        self.repository.books.update(id, &book).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }
}
