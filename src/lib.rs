//! Libris Library Management System
//!
//! A REST JSON API for managing a library catalog: books, per-genre book
//! details, loans, reviews and user accounts, behind a stateless
//! token-based access-control layer.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod security;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    /// Ordered authorization matrix, built once at startup
    pub rules: Arc<Vec<security::AccessRule>>,
}
