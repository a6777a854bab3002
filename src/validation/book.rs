//! Book validation rules

use crate::error::AppResult;
use crate::models::book::BookInput;

use super::{ValidationError, ValidationStore};

const MIN_YEAR: i32 = 1800;

fn is_valid_isbn(isbn: &str) -> bool {
    isbn.len() == 13 && isbn.chars().all(|c| c.is_ascii_digit())
}

/// Validate a book payload.
///
/// `own_id` is the row being updated, so a book keeping its own ISBN is not
/// a duplicate of itself. All violations are collected in rule order.
pub async fn validate_book<S: ValidationStore>(
    book: &BookInput,
    own_id: Option<i32>,
    current_year: i32,
    store: &S,
) -> AppResult<Vec<ValidationError>> {
    let mut errors = Vec::new();

    if book.title.trim().is_empty() {
        errors.push(ValidationError::Empty("Book title"));
    }

    if book.isbn.trim().is_empty() {
        errors.push(ValidationError::Empty("ISBN"));
    } else if !is_valid_isbn(&book.isbn) {
        errors.push(ValidationError::IsbnFormat);
    } else if let Some(holder) = store.book_id_with_isbn(&book.isbn).await? {
        if own_id != Some(holder) {
            errors.push(ValidationError::DuplicateIsbn(book.isbn.clone()));
        }
    }

    if book.author.trim().is_empty() {
        errors.push(ValidationError::Empty("Author"));
    }
    if book.publisher.trim().is_empty() {
        errors.push(ValidationError::Empty("Publisher"));
    }
    if book.year < MIN_YEAR || book.year > current_year {
        errors.push(ValidationError::YearOutOfRange(current_year));
    }
    if book.available_copies < 0 {
        errors.push(ValidationError::NegativeCopies);
    }

    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::testing::FakeStore;

    const YEAR: i32 = 2024;

    fn valid_book() -> BookInput {
        BookInput {
            isbn: "1234567890123".to_string(),
            title: "The Trial".to_string(),
            author: "Franz Kafka".to_string(),
            publisher: "Verlag Die Schmiede".to_string(),
            year: 1925,
            available_copies: 3,
        }
    }

    #[tokio::test]
    async fn valid_book_collects_no_errors() {
        let store = FakeStore::default();
        let errors = validate_book(&valid_book(), None, YEAR, &store).await.unwrap();
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn thirteen_digit_isbn_passes_shorter_fails() {
        let store = FakeStore::default();

        let mut book = valid_book();
        book.isbn = "12345".to_string();
        let errors = validate_book(&book, None, YEAR, &store).await.unwrap();
        assert_eq!(errors, vec![ValidationError::IsbnFormat]);

        book.isbn = "123456789012X".to_string();
        let errors = validate_book(&book, None, YEAR, &store).await.unwrap();
        assert_eq!(errors, vec![ValidationError::IsbnFormat]);
    }

    #[tokio::test]
    async fn empty_fields_are_each_reported() {
        let store = FakeStore::default();
        let book = BookInput {
            isbn: " ".to_string(),
            title: "".to_string(),
            author: "".to_string(),
            publisher: "".to_string(),
            year: 1900,
            available_copies: 0,
        };
        let errors = validate_book(&book, None, YEAR, &store).await.unwrap();
        assert_eq!(
            errors,
            vec![
                ValidationError::Empty("Book title"),
                ValidationError::Empty("ISBN"),
                ValidationError::Empty("Author"),
                ValidationError::Empty("Publisher"),
            ]
        );
    }

    #[tokio::test]
    async fn year_bounds_are_inclusive() {
        let store = FakeStore::default();
        for (year, ok) in [(1799, false), (1800, true), (YEAR, true), (YEAR + 1, false)] {
            let mut book = valid_book();
            book.year = year;
            let errors = validate_book(&book, None, YEAR, &store).await.unwrap();
            assert_eq!(errors.is_empty(), ok, "year {}", year);
        }
    }

    #[tokio::test]
    async fn negative_copies_rejected() {
        let store = FakeStore::default();
        let mut book = valid_book();
        book.available_copies = -1;
        let errors = validate_book(&book, None, YEAR, &store).await.unwrap();
        assert_eq!(errors, vec![ValidationError::NegativeCopies]);
    }

    #[tokio::test]
    async fn duplicate_isbn_conflicts_unless_own_row() {
        let mut store = FakeStore::default();
        store.isbns.insert("1234567890123".to_string(), 42);

        let errors = validate_book(&valid_book(), None, YEAR, &store).await.unwrap();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateIsbn("1234567890123".to_string())]
        );

        // Updating book 42 with its own ISBN is fine.
        let errors = validate_book(&valid_book(), Some(42), YEAR, &store).await.unwrap();
        assert!(errors.is_empty());

        // A different book taking that ISBN still conflicts.
        let errors = validate_book(&valid_book(), Some(7), YEAR, &store).await.unwrap();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateIsbn("1234567890123".to_string())]
        );
    }

    #[tokio::test]
    async fn validation_is_idempotent() {
        let mut store = FakeStore::default();
        store.isbns.insert("1234567890123".to_string(), 42);
        let book = valid_book();

        let first = validate_book(&book, None, YEAR, &store).await.unwrap();
        let second = validate_book(&book, None, YEAR, &store).await.unwrap();
        assert_eq!(first, second);
    }
}
