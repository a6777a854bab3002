//! Book detail validation rules
//!
//! Genre membership, summary length, cover URL reachability, plus the two
//! cross-entity rules: the book must exist and `(book_id, genre)` must be
//! unique. A clean pass is an empty violation list.

use crate::error::AppResult;
use crate::models::book_detail::{BookDetailInput, Genre};

use super::{CoverProbe, ValidationError, ValidationStore};

const MAX_SUMMARY_CHARS: usize = 1000;

/// Validate a book detail payload.
///
/// `own_id` is the detail row being updated; its own `(book, genre)` pair is
/// exempt from the uniqueness rule.
pub async fn validate_book_detail<S: ValidationStore, P: CoverProbe + ?Sized>(
    detail: &BookDetailInput,
    own_id: Option<i32>,
    store: &S,
    probe: &P,
) -> AppResult<Vec<ValidationError>> {
    let mut errors = Vec::new();

    let genre = if detail.genre.trim().is_empty() {
        errors.push(ValidationError::Empty("Genre"));
        None
    } else {
        match detail.genre.parse::<Genre>() {
            Ok(genre) => Some(genre),
            Err(_) => {
                errors.push(ValidationError::UnsupportedGenre(detail.genre.clone()));
                None
            }
        }
    };

    if detail.cover_image_url.trim().is_empty() {
        errors.push(ValidationError::Empty("Cover image URL"));
    } else if !probe.is_reachable(&detail.cover_image_url).await {
        errors.push(ValidationError::BadCoverImageUrl(
            detail.cover_image_url.clone(),
        ));
    }

    if detail.summary.trim().is_empty() {
        errors.push(ValidationError::Empty("Summary"));
    } else if detail.summary.chars().count() > MAX_SUMMARY_CHARS {
        errors.push(ValidationError::SummaryTooLong);
    }

    if !store.book_exists(detail.book_id).await? {
        errors.push(ValidationError::BookMissing(detail.book_id));
    } else if let Some(genre) = genre {
        if let Some(existing) = store.detail_id_for(detail.book_id, genre).await? {
            if own_id != Some(existing) {
                errors.push(ValidationError::DuplicateDetail(detail.book_id, genre));
            }
        }
    }

    Ok(errors)
}
