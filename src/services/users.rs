//! User management service (staff-facing account administration)

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, Role, UpdateUser, User},
    repository::Repository,
};

use super::auth::AuthService;

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    auth: AuthService,
}

impl UsersService {
    pub fn new(repository: Repository, auth: AuthService) -> Self {
        Self { repository, auth }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn get_by_username(&self, username: &str) -> AppResult<User> {
        self.repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))
    }

    pub async fn get_all(&self) -> AppResult<Vec<User>> {
        self.repository.users.get_all().await
    }

    /// How many loans (open or closed) the user has ever taken
    pub async fn loan_count(&self, id: i32) -> AppResult<i64> {
        self.repository.users.get_by_id(id).await?;
        self.repository.loans.count_by_user(id).await
    }

    /// Create a user, hashing the supplied password
    pub async fn create(&self, user: CreateUser) -> AppResult<User> {
        if self
            .repository
            .users
            .username_exists(&user.username, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Username {} already exists",
                user.username
            )));
        }

        let digest = self.auth.hash_password(&user.password)?;
        tracing::info!(username = %user.username, "adding user");
        self.repository
            .users
            .create(
                &user.username,
                &digest,
                user.role.unwrap_or(Role::User),
                user.email.as_deref(),
                user.name.as_deref(),
            )
            .await
    }

    /// Update a user; omitting the password keeps the stored digest.
    pub async fn update(&self, id: i32, user: UpdateUser) -> AppResult<User> {
        let existing = self.repository.users.get_by_id(id).await?;

        if self
            .repository
            .users
            .username_exists(&user.username, Some(id))
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Username {} already exists",
                user.username
            )));
        }

        let digest = match &user.password {
            Some(password) => self.auth.hash_password(password)?,
            None => existing.password,
        };

        self.repository
            .users
            .update(
                id,
                &user.username,
                &digest,
                user.role,
                user.email.as_deref(),
                user.name.as_deref(),
            )
            .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.users.delete(id).await
    }
}
