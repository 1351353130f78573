//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::user_handler::{ListUsersResponse, SignupRequest, SignupResponse};
use domain::UserResponse;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::signup,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::delete_user,
    ),
    components(
        schemas(
            SignupRequest,
            SignupResponse,
            ListUsersResponse,
            UserResponse,
        )
    ),
    tags(
        (name = "Users", description = "User sign-up and management endpoints"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_user_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/users"));
        assert!(doc.paths.paths.contains_key("/users/{id}"));
    }
}
