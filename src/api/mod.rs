//! API handlers for the Libris REST endpoints

pub mod auth;
pub mod book_details;
pub mod books;
pub mod health;
pub mod loans;
pub mod openapi;
pub mod reviews;
pub mod users;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, security::Principal, AppState};

/// Extractor for the verified principal placed in request extensions by the
/// enforcement middleware. By the time a protected handler runs the matrix
/// has already allowed the request, so a missing principal here means the
/// route genuinely permits anonymous access.
pub struct CurrentUser(pub Principal);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Option<Principal>>()
            .cloned()
            .flatten()
            .map(CurrentUser)
            .ok_or_else(|| AppError::Authentication("Authentication required".to_string()))
    }
}

/// Like [`CurrentUser`] but tolerates anonymous requests.
pub struct MaybeUser(pub Option<Principal>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(
            parts.extensions.get::<Option<Principal>>().cloned().flatten(),
        ))
    }
}
