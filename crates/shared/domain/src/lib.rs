//! Domain layer - Core user entities, field validation and list-query
//! normalization.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Nothing here performs I/O or logs; every function is safe to call from any
//! number of request tasks at once.

pub mod constants;
pub mod error;
pub mod password;
pub mod query;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use query::{normalize, normalize_with_default_limit, PaginationRequest, SortColumn};
pub use user::{parse_user_id, User, UserInput, UserResponse};
pub use validation::{validate_email, validate_name, validate_password, validate_user};
