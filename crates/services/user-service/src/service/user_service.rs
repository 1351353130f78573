//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{PaginationRequest, Password, User, UserInput};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
///
/// Soft-deleted users are invisible to every operation except the
/// duplicate-email check on sign-up.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate, hash and store a new user
    async fn signup(&self, input: UserInput) -> AppResult<User>;

    /// Get active user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// One page of active users plus the total number of active users
    async fn list_users(&self, page: &PaginationRequest) -> AppResult<(Vec<User>, u64)>;

    /// Soft delete user (sets deleted_at timestamp)
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn signup(&self, input: UserInput) -> AppResult<User> {
        input.validate()?;

        // Addresses of deleted accounts stay reserved
        if self
            .repo
            .find_by_email_with_deleted(&input.email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Email"));
        }

        // Argon2 is CPU bound
        let plain = input.password.clone();
        let password = tokio::task::spawn_blocking(move || Password::new(&plain))
            .await
            .map_err(|e| AppError::internal(format!("Password task failed: {}", e)))??;

        let last_name = input.last_name_or_empty().to_string();
        let user = self
            .repo
            .create(input.first_name, last_name, input.email, password.into_string())
            .await?;

        tracing::info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self, page: &PaginationRequest) -> AppResult<(Vec<User>, u64)> {
        let users = self.repo.list(page).await?;
        let total = self.repo.count().await?;
        Ok((users, total))
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
