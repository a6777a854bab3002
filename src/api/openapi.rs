//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, book_details, books, health, loans, reviews, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.3.0",
        description = "Library Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::is_logged_in,
        // Books
        books::add_book,
        books::get_all_books,
        books::get_book,
        books::update_book,
        books::delete_book,
        // Book details
        book_details::add_book_detail,
        book_details::get_all_book_details,
        book_details::get_book_detail,
        book_details::update_book_detail,
        book_details::delete_book_detail,
        // Loans
        loans::add_loan,
        loans::get_all_loans,
        loans::get_loan,
        loans::get_user_loans,
        loans::update_loan,
        loans::return_loan,
        loans::delete_loan,
        // Reviews
        reviews::add_review,
        reviews::get_all_reviews,
        reviews::get_review,
        reviews::update_review,
        reviews::delete_review,
        // Users
        users::get_current_user_id,
        users::get_user_loan_count,
        users::add_user,
        users::get_all_users,
        users::get_user,
        users::update_user,
        users::delete_user,
    ),
    components(schemas(
        crate::error::ErrorResponse,
        crate::models::book::Book,
        crate::models::book::BookInput,
        crate::models::book_detail::BookDetail,
        crate::models::book_detail::BookDetailInput,
        crate::models::book_detail::Genre,
        crate::models::loan::Loan,
        crate::models::loan::LoanInput,
        crate::models::review::Review,
        crate::models::review::ReviewInput,
        crate::models::user::User,
        crate::models::user::CreateUser,
        crate::models::user::UpdateUser,
        crate::models::user::Role,
        auth::LoginForm,
        auth::LoginResponse,
        health::HealthResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Authentication and registration"),
        (name = "books", description = "Book catalog management"),
        (name = "book-details", description = "Book detail management"),
        (name = "loans", description = "Lending and returning of books"),
        (name = "reviews", description = "Book reviews"),
        (name = "users", description = "User account management"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Router serving the Swagger UI and the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(
        SwaggerUi::new("/swagger-ui").url("/v3/api-docs/openapi.json", ApiDoc::openapi()),
    )
}
