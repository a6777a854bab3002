//! Authentication service: credential checks, password hashing, token issue

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{CreateUser, Role, User},
    repository::Repository,
    security::{token, Principal},
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by username and password and issue a session token.
    ///
    /// Unknown user and wrong password produce the identical 401 so the
    /// endpoint cannot be used to enumerate accounts.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::Authentication("Invalid username or password".to_string())
            })?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let principal = Principal {
            subject: user.username.clone(),
            role: user.role,
        };
        token::issue(
            &principal,
            Utc::now(),
            &self.config.jwt_secret,
            Duration::minutes(self.config.token_ttl_minutes),
        )
        .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Register a new account. Self-registration always yields a reader;
    /// staff accounts are created through the user-management endpoints.
    pub async fn register(&self, new_user: CreateUser) -> AppResult<User> {
        if self
            .repository
            .users
            .username_exists(&new_user.username, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Username {} already exists",
                new_user.username
            )));
        }

        let digest = self.hash_password(&new_user.password)?;
        self.repository
            .users
            .create(
                &new_user.username,
                &digest,
                Role::User,
                new_user.email.as_deref(),
                new_user.name.as_deref(),
            )
            .await
    }

    /// Verify a plaintext password against a stored argon2 digest
    pub fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
