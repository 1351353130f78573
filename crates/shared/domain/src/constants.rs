//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum name length (in characters)
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum name length (in characters)
pub const MAX_NAME_LENGTH: usize = 256;

/// Maximum byte length of the email local part (RFC 5321)
pub const MAX_EMAIL_LOCAL_PART_LENGTH: usize = 64;

/// Maximum byte length of the email domain part (RFC 5321)
pub const MAX_EMAIL_DOMAIN_LENGTH: usize = 255;

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length requirement
pub const MAX_PASSWORD_LENGTH: usize = 256;

// =============================================================================
// Field names
// =============================================================================

pub const FIELD_FIRST_NAME: &str = "first_name";
pub const FIELD_LAST_NAME: &str = "last_name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_CREATED_AT: &str = "created_at";

// =============================================================================
// Pagination
// =============================================================================

/// Query parameter names
pub const PARAM_OFFSET: &str = "offset";
pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_SORT: &str = "sort";

/// Offset used when the request carries none
pub const DEFAULT_PAGE_OFFSET: u64 = 0;

/// Page size used when the request carries none
pub const DEFAULT_PAGE_LIMIT: u64 = 5;

/// Sort order used when the request carries none
pub const DEFAULT_SORT: &str = "first_name,last_name";

/// Separator between sort columns in the `sort` query parameter
pub const SORT_SEPARATOR: &str = ",";
