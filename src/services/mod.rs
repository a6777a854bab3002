//! Business logic services

pub mod auth;
pub mod book_details;
pub mod books;
pub mod loans;
pub mod reviews;
pub mod users;

use std::sync::Arc;

use crate::{config::AuthConfig, repository::Repository, validation::HttpCoverProbe};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub books: books::BooksService,
    pub book_details: book_details::BookDetailsService,
    pub loans: loans::LoansService,
    pub reviews: reviews::ReviewsService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        let auth = auth::AuthService::new(repository.clone(), auth_config);
        let probe = Arc::new(HttpCoverProbe::new());
        Self {
            books: books::BooksService::new(repository.clone()),
            book_details: book_details::BookDetailsService::new(repository.clone(), probe),
            loans: loans::LoansService::new(repository.clone()),
            reviews: reviews::ReviewsService::new(repository.clone()),
            users: users::UsersService::new(repository, auth.clone()),
            auth,
        }
    }
}
