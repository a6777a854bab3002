//! Per-request access-control enforcement
//!
//! Runs before every handler: extract the bearer credential if present,
//! verify it, then ask the matrix whether this principal may perform this
//! request. Handlers receive the principal through request extensions and
//! never consult any global authentication state.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crate::{error::AppError, AppState};

use super::{
    rules::{authorize, Decision, DenyReason},
    token::{self, Principal},
};

/// Pull the raw token out of an `Authorization: Bearer <token>` header.
/// A missing or differently-shaped header is "no credential", not an error.
fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Middleware enforcing the authorization matrix on every request.
pub async fn enforce(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal: Option<Principal> = match bearer_token(&request) {
        Some(raw) => match token::verify(raw, Utc::now(), &state.config.auth.jwt_secret) {
            Ok(principal) => Some(principal),
            Err(reason) => {
                // The request continues anonymously; the matrix decides
                // whether that is enough for this route.
                tracing::debug!(%reason, "rejected bearer token");
                None
            }
        },
        None => None,
    };

    match authorize(
        principal.as_ref(),
        request.method(),
        request.uri().path(),
        &state.rules,
    ) {
        Decision::Allow => {
            request.extensions_mut().insert(principal);
            Ok(next.run(request).await)
        }
        Decision::Deny(DenyReason::Unauthenticated) => Err(AppError::Authentication(
            "Authentication required".to_string(),
        )),
        Decision::Deny(DenyReason::Forbidden) => {
            let subject = principal.map(|p| p.subject).unwrap_or_default();
            tracing::debug!(%subject, path = %request.uri().path(), "role check failed");
            Err(AppError::Authorization("Insufficient role".to_string()))
        }
    }
}
