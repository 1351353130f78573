//! User handlers.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use common::AppResult;
use domain::{
    normalize_with_default_limit, parse_user_id, DomainError, PaginationRequest, UserInput,
    UserResponse, FIELD_EMAIL, FIELD_PASSWORD, PARAM_LIMIT, PARAM_OFFSET, PARAM_SORT,
};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Sign-up request
#[derive(Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    #[schema(example = "John")]
    pub first_name: String,
    /// Optional; an empty value is stored as empty
    #[schema(example = "Doe")]
    #[serde(default)]
    pub last_name: Option<String>,
    #[schema(example = "john@example.com")]
    pub email: String,
    /// 8 to 256 printable ASCII characters
    #[schema(example = "Secret123!")]
    pub password: String,
}

impl From<SignupRequest> for UserInput {
    fn from(req: SignupRequest) -> Self {
        UserInput {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
        }
    }
}

fn invalid_field(err: &DomainError) -> &'static str {
    match err {
        DomainError::InvalidName { field, .. } => *field,
        DomainError::InvalidEmail(_) => FIELD_EMAIL,
        DomainError::InvalidPassword(_) => FIELD_PASSWORD,
        _ => "__all__",
    }
}

// Field rules live in the domain; they stop at the first failing field.
impl Validate for SignupRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let input = UserInput::from(self.clone());
        input.validate().map_err(|err| {
            let mut error = ValidationError::new("invalid");
            error.message = Some(Cow::Owned(err.to_string()));

            let mut errors = ValidationErrors::new();
            errors.add(invalid_field(&err), error);
            errors
        })
    }
}

/// Sign-up response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub id: Uuid,
}

/// Listing query. Parameters outside these three are ignored.
#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Rows to skip, default 0
    pub offset: Option<u64>,
    /// Page size, default 5
    pub limit: Option<u64>,
    /// Comma-separated columns from first_name, last_name, created_at
    pub sort: Option<String>,
}

/// One page of users
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListUsersResponse {
    pub results: Vec<UserResponse>,
    /// Link to the following page, absent on the last one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(signup))
        .route("/:id", get(get_user).delete(delete_user))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = SignupResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    let user = state.user_service.signup(payload.into()).await?;
    tracing::debug!(user_id = %user.id, "User created");

    Ok((StatusCode::CREATED, Json(SignupResponse { id: user.id })))
}

/// Link to the page after `page`, when there is one.
fn next_link(
    page: &PaginationRequest,
    remainder: Option<PaginationRequest>,
    total: u64,
) -> Option<String> {
    // Nothing left to serve past the last active user
    let next = remainder.filter(|r| r.offset < total).or_else(|| {
        let offset = page.offset.saturating_add(page.limit);
        (page.limit > 0 && offset < total).then(|| PaginationRequest {
            offset,
            ..page.clone()
        })
    })?;

    Some(format!("/users?{}", next))
}

/// List active users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "One page of users", body = ListUsersResponse),
        (status = 400, description = "Malformed offset, limit or sort")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<ListUsersResponse>> {
    let arg = |name: &str| params.get(name).map(String::as_str).unwrap_or_default();

    let request = normalize_with_default_limit(
        arg(PARAM_OFFSET),
        arg(PARAM_LIMIT),
        arg(PARAM_SORT),
        state.config.pagination.default_limit,
    )?;
    let (page, remainder) = request.capped(state.config.pagination.max_page_size);

    let (users, total) = state.user_service.list_users(&page).await?;

    Ok(Json(ListUsersResponse {
        results: users.into_iter().map(UserResponse::from).collect(),
        next: next_link(&page, remainder, total),
    }))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 400, description = "invalid UUID format"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let id = parse_user_id(&id)?;
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 400, description = "invalid UUID format"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_user_id(&id)?;
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::SortColumn;

    fn request(first_name: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            first_name: first_name.to_string(),
            last_name: None,
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_validate_reports_first_failing_field() {
        let errors = request("J", "bad", "short").validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("first_name"));

        let errors = request("John", "bad", "short").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_validate_accepts_valid_request() {
        assert!(request("John", "john@example.com", "Secret123!")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_next_link_from_cap() {
        let page = PaginationRequest {
            offset: 0,
            limit: 100,
            sort: vec![SortColumn::FirstName],
        };
        let remainder = PaginationRequest {
            offset: 100,
            limit: 50,
            sort: vec![SortColumn::FirstName],
        };

        assert_eq!(
            next_link(&page, Some(remainder), 500).as_deref(),
            Some("/users?offset=100&limit=50&sort=first_name")
        );
    }

    #[test]
    fn test_next_link_cap_remainder_past_total() {
        let page = PaginationRequest {
            offset: 0,
            limit: 100,
            sort: vec![SortColumn::FirstName],
        };
        let remainder = PaginationRequest {
            offset: 100,
            limit: 900,
            sort: vec![SortColumn::FirstName],
        };

        assert_eq!(next_link(&page, Some(remainder), 4), None);
    }

    #[test]
    fn test_next_link_from_total() {
        let page = PaginationRequest::default();

        assert_eq!(
            next_link(&page, None, 12).as_deref(),
            Some("/users?offset=5&limit=5&sort=first_name,last_name")
        );
        assert_eq!(next_link(&page, None, 5), None);
    }
}
