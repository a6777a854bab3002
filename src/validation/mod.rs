//! Entity validation engine
//!
//! One rule set per entity, each a function of the input and a read-only
//! lookup context. Validators collect every violation in rule order; the
//! service layer surfaces the first one. The lookup context and the cover
//! URL probe are traits so the whole engine runs in unit tests against
//! in-memory fakes.

pub mod book;
pub mod book_detail;
pub mod loan;
pub mod review;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::error::{AppError, AppResult};
use crate::models::book_detail::Genre;

/// A single invariant violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    #[error("ISBN must be 13 digits long")]
    IsbnFormat,
    #[error("Duplicate ISBN: {0}")]
    DuplicateIsbn(String),
    #[error("Year must be between 1800 and {0}")]
    YearOutOfRange(i32),
    #[error("Available copies cannot be negative")]
    NegativeCopies,
    #[error("Genre {0} is not supported")]
    UnsupportedGenre(String),
    #[error("Cover image URL is malformed or unreachable: {0}")]
    BadCoverImageUrl(String),
    #[error("Summary exceeds maximum length of 1000 characters")]
    SummaryTooLong,
    #[error("Book with id {0} not found")]
    BookMissing(i32),
    #[error("User with id {0} not found")]
    UserMissing(i32),
    #[error("Duplicate detail for book {0} and genre {1}")]
    DuplicateDetail(i32, Genre),
    #[error("Duplicate review for book and user not allowed")]
    DuplicateReview,
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
    #[error("Due date cannot be before loan date")]
    DueBeforeLoanDate,
    #[error("Return date cannot be before loan date")]
    ReturnBeforeLoanDate,
}

impl ValidationError {
    /// Fold a violation into the boundary taxonomy: dangling references are
    /// 404, uniqueness clashes 409, everything else 400.
    pub fn into_app_error(self) -> AppError {
        match self {
            ValidationError::BookMissing(_) | ValidationError::UserMissing(_) => {
                AppError::NotFound(self.to_string())
            }
            ValidationError::DuplicateIsbn(_)
            | ValidationError::DuplicateDetail(_, _)
            | ValidationError::DuplicateReview => AppError::Conflict(self.to_string()),
            _ => AppError::Validation(self.to_string()),
        }
    }
}

/// Surface the first collected violation, if any.
pub fn first_violation(errors: Vec<ValidationError>) -> AppResult<()> {
    match errors.into_iter().next() {
        Some(error) => Err(error.into_app_error()),
        None => Ok(()),
    }
}

/// Read-only lookups the validators need for cross-entity rules.
///
/// Implemented by the Postgres repository in production and by hashmap
/// fakes in tests. Nothing behind this trait mutates state.
#[async_trait]
pub trait ValidationStore: Sync {
    async fn book_exists(&self, book_id: i32) -> AppResult<bool>;
    async fn user_exists(&self, user_id: i32) -> AppResult<bool>;
    /// Id of the book currently holding this ISBN, if any
    async fn book_id_with_isbn(&self, isbn: &str) -> AppResult<Option<i32>>;
    /// Id of the detail record for this `(book, genre)` pair, if any
    async fn detail_id_for(&self, book_id: i32, genre: Genre) -> AppResult<Option<i32>>;
    /// Id of the review this user already wrote for this book, if any
    async fn review_id_for(&self, user_id: i32, book_id: i32) -> AppResult<Option<i32>>;
}

/// Outbound reachability check for cover image URLs.
#[async_trait]
pub trait CoverProbe: Sync {
    /// True when the URL parses and a HEAD request answers 2xx/3xx.
    /// Any I/O failure is "unreachable", never an error.
    async fn is_reachable(&self, url: &str) -> bool;
}

/// Production probe: HEAD request over HTTP(S) with a hard 5-second timeout.
pub struct HttpCoverProbe {
    client: reqwest::Client,
}

/// Upper bound on one reachability check
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

impl HttpCoverProbe {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpCoverProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CoverProbe for HttpCoverProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        let parsed = match reqwest::Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return false;
        }
        // The timeout rides on the request so it holds even if the builder
        // above fell back to a default client.
        match self.client.head(parsed).timeout(PROBE_TIMEOUT).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                (200..=399).contains(&status)
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "cover image probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn probe_rejects_malformed_and_non_http_urls() {
        let probe = HttpCoverProbe::new();
        assert!(!probe.is_reachable("not a url").await);
        assert!(!probe.is_reachable("ftp://covers.example.org/trial.jpg").await);
        assert!(!probe.is_reachable("file:///tmp/cover.jpg").await);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory fakes shared by the validator unit tests

    use std::collections::{HashMap, HashSet};

    use async_trait::async_trait;

    use crate::error::AppResult;
    use crate::models::book_detail::Genre;

    use super::{CoverProbe, ValidationStore};

    /// Hashmap-backed lookup context
    #[derive(Default)]
    pub struct FakeStore {
        pub books: HashSet<i32>,
        pub users: HashSet<i32>,
        pub isbns: HashMap<String, i32>,
        pub details: HashMap<(i32, Genre), i32>,
        pub reviews: HashMap<(i32, i32), i32>,
    }

    #[async_trait]
    impl ValidationStore for FakeStore {
        async fn book_exists(&self, book_id: i32) -> AppResult<bool> {
            Ok(self.books.contains(&book_id))
        }

        async fn user_exists(&self, user_id: i32) -> AppResult<bool> {
            Ok(self.users.contains(&user_id))
        }

        async fn book_id_with_isbn(&self, isbn: &str) -> AppResult<Option<i32>> {
            Ok(self.isbns.get(isbn).copied())
        }

        async fn detail_id_for(&self, book_id: i32, genre: Genre) -> AppResult<Option<i32>> {
            Ok(self.details.get(&(book_id, genre)).copied())
        }

        async fn review_id_for(&self, user_id: i32, book_id: i32) -> AppResult<Option<i32>> {
            Ok(self.reviews.get(&(user_id, book_id)).copied())
        }
    }

    /// Probe that answers from a fixed set of reachable URLs
    pub struct FakeProbe {
        pub reachable: HashSet<String>,
    }

    impl FakeProbe {
        pub fn reaching(urls: &[&str]) -> Self {
            Self {
                reachable: urls.iter().map(|u| u.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl CoverProbe for FakeProbe {
        async fn is_reachable(&self, url: &str) -> bool {
            self.reachable.contains(url)
        }
    }
}
