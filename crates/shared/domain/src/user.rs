//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::validation::validate_user;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new active user
    pub fn new(
        id: Uuid,
        email: String,
        first_name: String,
        last_name: String,
        password_hash: String,
    ) -> Self {
        Self {
            id,
            email,
            first_name,
            last_name,
            password_hash,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    /// Check if user is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if user is active (not deleted)
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Soft delete the user
    pub fn soft_delete(&mut self) {
        self.deleted_at = Some(Utc::now());
    }
}

/// Sign-up data as submitted by a client.
#[derive(Clone, Deserialize)]
pub struct UserInput {
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
}

// Don't expose the plain-text password in debug output
impl std::fmt::Debug for UserInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInput")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl UserInput {
    /// Check every field, stopping at the first failure.
    pub fn validate(&self) -> DomainResult<()> {
        validate_user(self)
    }

    /// Last name as stored: absent is kept as an empty string.
    pub fn last_name_or_empty(&self) -> &str {
        self.last_name.as_deref().unwrap_or_default()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    #[cfg_attr(feature = "openapi", schema(example = "91e3dcf7-34a6-4646-bd37-383cc949da93"))]
    pub id: Uuid,
    /// User email address
    #[cfg_attr(feature = "openapi", schema(example = "john@example.com"))]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(example = "John"))]
    pub first_name: String,
    #[cfg_attr(feature = "openapi", schema(example = "Doe"))]
    pub last_name: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: user.created_at,
        }
    }
}

/// Parse a user identifier from its textual form.
pub fn parse_user_id(raw: &str) -> DomainResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| DomainError::InvalidId)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            Uuid::new_v4(),
            "john@example.com".to_string(),
            "John".to_string(),
            "Doe".to_string(),
            "hashed".to_string(),
        )
    }

    #[test]
    fn test_new_user_is_active() {
        let user = sample_user();
        assert!(user.is_active());
        assert!(!user.is_deleted());
    }

    #[test]
    fn test_soft_delete() {
        let mut user = sample_user();
        user.soft_delete();
        assert!(user.is_deleted());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("deleted_at"));
    }

    #[test]
    fn test_user_input_debug_redacts_password() {
        let input = UserInput {
            first_name: "John".to_string(),
            last_name: None,
            email: "john@example.com".to_string(),
            password: "Secret123".to_string(),
        };
        let debug = format!("{:?}", input);
        assert!(!debug.contains("Secret123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_user_input_missing_last_name_deserializes() {
        let input: UserInput = serde_json::from_str(
            r#"{"first_name":"John","email":"john@example.com","password":"Secret123"}"#,
        )
        .unwrap();
        assert!(input.last_name.is_none());
        assert_eq!(input.last_name_or_empty(), "");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_response_from_user() {
        let user = sample_user();
        let response = UserResponse::from(&user);
        assert_eq!(response.id, user.id);
        assert_eq!(response.first_name, "John");
        assert_eq!(response.last_name, "Doe");
    }

    #[test]
    fn test_parse_user_id() {
        assert!(parse_user_id("91e3dcf7-34a6-4646-bd37-383cc949da93").is_ok());
        assert_eq!(
            parse_user_id("00000000--000-0000-0000-000000000000"),
            Err(DomainError::InvalidId)
        );
    }
}
