//! Libris Server - Library Management System

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libris_server::{
    api,
    config::AppConfig,
    repository::Repository,
    security,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("libris_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Libris Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations (the uniqueness and open-loan constraints live here)
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
        rules: Arc::new(security::access_rules()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Authentication
        .route("/login", post(api::auth::login))
        .route("/register", post(api::auth::register))
        .route("/isLoggedIn", get(api::auth::is_logged_in))
        // Books
        .route("/book/add", post(api::books::add_book))
        .route("/book/getAll", get(api::books::get_all_books))
        .route("/book/:id", get(api::books::get_book))
        .route("/book/update/:id", put(api::books::update_book))
        .route("/book/delete/:id", delete(api::books::delete_book))
        // Book details
        .route("/bookDetail/add", post(api::book_details::add_book_detail))
        .route("/bookDetail/getAll", get(api::book_details::get_all_book_details))
        .route("/bookDetail/:id", get(api::book_details::get_book_detail))
        .route("/bookDetail/update/:id", put(api::book_details::update_book_detail))
        .route("/bookDetail/delete/:id", delete(api::book_details::delete_book_detail))
        // Loans
        .route("/loan/add", post(api::loans::add_loan))
        .route("/loan/getAll", get(api::loans::get_all_loans))
        .route("/loan/:id", get(api::loans::get_loan))
        .route("/loan/user/:user_id", get(api::loans::get_user_loans))
        .route("/loan/update/:id", put(api::loans::update_loan))
        .route("/loan/return/:id", put(api::loans::return_loan))
        .route("/loan/delete/:id", delete(api::loans::delete_loan))
        // Reviews
        .route("/review/add", post(api::reviews::add_review))
        .route("/review/getAll", get(api::reviews::get_all_reviews))
        .route("/review/:id", get(api::reviews::get_review))
        .route("/review/update/:id", put(api::reviews::update_review))
        .route("/review/delete/:id", delete(api::reviews::delete_review))
        // Users
        .route("/user/current", get(api::users::get_current_user_id))
        .route("/user/:id/loanCount", get(api::users::get_user_loan_count))
        .route("/user/add", post(api::users::add_user))
        .route("/user/getAll", get(api::users::get_all_users))
        .route("/user/:id", get(api::users::get_user))
        .route("/user/update/:id", put(api::users::update_user))
        .route("/user/delete/:id", delete(api::users::delete_user))
        .with_state(state.clone());

    // OpenAPI documentation (public per the access matrix)
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(routes)
        .merge(openapi)
        // The matrix gate runs before every handler, docs included
        .layer(middleware::from_fn_with_state(
            state,
            security::middleware::enforce,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
