//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A first or last name does not satisfy the name rule
    #[error("invalid {field}: {reason}")]
    InvalidName { field: &'static str, reason: String },

    /// Email is too long or malformed
    #[error("invalid email: {0}")]
    InvalidEmail(String),

    /// Password length or character set is not acceptable
    #[error("invalid password: {0}")]
    InvalidPassword(String),

    /// Offset, limit or sort query argument is malformed or disallowed
    #[error("{0}")]
    InvalidQueryArgument(String),

    /// Identifier is not a UUID
    #[error("invalid UUID format")]
    InvalidId,

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Entity already exists (conflict)
    #[error("{0} already exists")]
    Conflict(String),

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a name error for the given field
    pub fn invalid_name(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvalidName {
            field,
            reason: reason.into(),
        }
    }

    pub fn invalid_email(reason: impl Into<String>) -> Self {
        DomainError::InvalidEmail(reason.into())
    }

    pub fn invalid_password(reason: impl Into<String>) -> Self {
        DomainError::InvalidPassword(reason.into())
    }

    pub fn invalid_query(detail: impl Into<String>) -> Self {
        DomainError::InvalidQueryArgument(detail.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    /// Create a conflict error
    pub fn conflict(entity: impl Into<String>) -> Self {
        DomainError::Conflict(entity.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
