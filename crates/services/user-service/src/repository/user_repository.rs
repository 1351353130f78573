//! User repository implementation with soft delete support.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult, OptionExt};
use domain::{PaginationRequest, SortColumn, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// All reads exclude soft-deleted records unless the method name says
/// otherwise.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find active user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email including soft-deleted
    async fn find_by_email_with_deleted(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user with an already hashed password
    async fn create(
        &self,
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
    ) -> AppResult<User>;

    /// One page of active users, ordered by the requested columns
    async fn list(&self, page: &PaginationRequest) -> AppResult<Vec<User>>;

    /// Number of active users
    async fn count(&self) -> AppResult<u64>;

    /// Soft delete user by ID (sets deleted_at timestamp)
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserRepository with soft delete
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(column: SortColumn) -> user::Column {
    match column {
        SortColumn::FirstName => user::Column::FirstName,
        SortColumn::LastName => user::Column::LastName,
        SortColumn::CreatedAt => user::Column::CreatedAt,
    }
}

/// Apply ordering, offset and limit of a page request to a select.
fn paginate(mut query: Select<UserEntity>, page: &PaginationRequest) -> Select<UserEntity> {
    for column in &page.sort {
        query = query.order_by_asc(sort_column(*column));
    }
    // Stable order for rows tied on every requested column
    query
        .order_by_asc(user::Column::Id)
        .offset(page.offset)
        .limit(page.limit)
}

/// Map an insert failure, turning a duplicate email into a conflict.
fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("unique constraint violated: {}", detail);
            AppError::conflict("Email")
        }
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email_with_deleted(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(
        &self,
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
    ) -> AppResult<User> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(first_name),
            last_name: Set(last_name),
            email: Set(email),
            password_hash: Set(password_hash),
            created_at: Set(chrono::Utc::now()),
            deleted_at: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(map_insert_error)?;
        tracing::debug!(user_id = %model.id, "user stored");
        Ok(User::from(model))
    }

    async fn list(&self, page: &PaginationRequest) -> AppResult<Vec<User>> {
        let query = UserEntity::find().filter(user::Column::DeletedAt.is_null());

        let models = paginate(query, page)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        UserEntity::find()
            .filter(user::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        // Soft delete: set deleted_at timestamp
        let user = UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut active: ActiveModel = user.into();
        active.deleted_at = Set(Some(chrono::Utc::now()));

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_paginate_orders_by_requested_columns() {
        let page = PaginationRequest {
            offset: 10,
            limit: 3,
            sort: vec![SortColumn::LastName, SortColumn::CreatedAt],
        };

        let sql = paginate(UserEntity::find(), &page)
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(
            r#"ORDER BY "users"."last_name" ASC, "users"."created_at" ASC, "users"."id" ASC"#
        ));
        assert!(sql.contains("LIMIT 3"));
        assert!(sql.contains("OFFSET 10"));
    }

    #[test]
    fn test_paginate_keeps_duplicate_columns() {
        let page = PaginationRequest {
            offset: 0,
            limit: 5,
            sort: vec![SortColumn::FirstName, SortColumn::FirstName],
        };

        let sql = paginate(UserEntity::find(), &page)
            .build(DbBackend::Postgres)
            .to_string();

        assert_eq!(sql.matches(r#""users"."first_name" ASC"#).count(), 2);
    }

    #[test]
    fn test_non_unique_errors_pass_through() {
        let err = map_insert_error(DbErr::Custom("boom".to_string()));
        assert!(matches!(err, AppError::Database(_)));
    }
}
