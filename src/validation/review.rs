//! Review validation rules

use crate::error::AppResult;
use crate::models::review::ReviewInput;

use super::{ValidationError, ValidationStore};

/// Validate a review payload.
///
/// Rule order mirrors the boundary's preference: dangling references first,
/// then the one-review-per-user-per-book rule, then the rating bounds.
pub async fn validate_review<S: ValidationStore>(
    review: &ReviewInput,
    own_id: Option<i32>,
    store: &S,
) -> AppResult<Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !store.user_exists(review.user_id).await? {
        errors.push(ValidationError::UserMissing(review.user_id));
    }
    if !store.book_exists(review.book_id).await? {
        errors.push(ValidationError::BookMissing(review.book_id));
    }
    if let Some(existing) = store.review_id_for(review.user_id, review.book_id).await? {
        if own_id != Some(existing) {
            errors.push(ValidationError::DuplicateReview);
        }
    }
    if review.rating < 1 || review.rating > 5 {
        errors.push(ValidationError::RatingOutOfRange);
    }

    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::testing::FakeStore;
    use chrono::NaiveDate;

    fn store() -> FakeStore {
        let mut store = FakeStore::default();
        store.users.insert(10);
        store.books.insert(1);
        store
    }

    fn review(rating: i32) -> ReviewInput {
        ReviewInput {
            book_id: 1,
            user_id: 10,
            rating,
            comment: Some("Bleak and brilliant.".to_string()),
            review_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn rating_bounds_are_one_to_five() {
        let store = store();
        for (rating, ok) in [(0, false), (1, true), (3, true), (5, true), (6, false)] {
            let errors = validate_review(&review(rating), None, &store).await.unwrap();
            assert_eq!(errors.is_empty(), ok, "rating {}", rating);
        }
    }

    #[tokio::test]
    async fn dangling_references_are_reported() {
        let store = store();

        let mut r = review(3);
        r.user_id = 99;
        let errors = validate_review(&r, None, &store).await.unwrap();
        assert_eq!(errors, vec![ValidationError::UserMissing(99)]);

        let mut r = review(3);
        r.book_id = 99;
        let errors = validate_review(&r, None, &store).await.unwrap();
        assert_eq!(errors, vec![ValidationError::BookMissing(99)]);
    }

    #[tokio::test]
    async fn second_review_by_same_user_conflicts() {
        let mut store = store();
        store.reviews.insert((10, 1), 77);

        let errors = validate_review(&review(4), None, &store).await.unwrap();
        assert_eq!(errors, vec![ValidationError::DuplicateReview]);

        // Updating review 77 itself is allowed.
        let errors = validate_review(&review(4), Some(77), &store).await.unwrap();
        assert!(errors.is_empty());
    }
}
