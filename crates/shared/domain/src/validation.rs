//! Field validation for user sign-up data.
//!
//! Every check is a pure function of its input. Patterns are compiled once
//! on first use and shared read-only afterwards.
//!
//! [`validate_user`] checks fields in a fixed order (first name, last name,
//! email, password) and stops at the first failure, so callers always see
//! the earliest offending field.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    FIELD_FIRST_NAME, FIELD_LAST_NAME, MAX_EMAIL_DOMAIN_LENGTH, MAX_EMAIL_LOCAL_PART_LENGTH,
    MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH, MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH,
};
use crate::error::{DomainError, DomainResult};
use crate::user::UserInput;

/// Unicode letters, spaces, hyphens, apostrophes and periods.
/// Length is checked separately in characters.
static NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L} .'\-]+$").expect("NAME_REGEX is a valid regex pattern")
});

/// `local-part@domain`: dot-separated atoms before the `@`, dot-separated
/// alphanumeric/hyphen labels after it.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    ))
    .expect("EMAIL_REGEX is a valid regex pattern")
});

/// Validate a first or last name.
///
/// An empty name passes when `required` is false (optional last name).
pub fn validate_name(field: &'static str, name: &str, required: bool) -> DomainResult<()> {
    if !required && name.is_empty() {
        return Ok(());
    }

    let len = name.chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
        return Err(DomainError::invalid_name(
            field,
            format!(
                "must be between {} and {} characters long",
                MIN_NAME_LENGTH, MAX_NAME_LENGTH
            ),
        ));
    }

    if !NAME_REGEX.is_match(name) {
        return Err(DomainError::invalid_name(
            field,
            "may contain only letters, spaces, hyphens, apostrophes and periods",
        ));
    }

    Ok(())
}

/// Validate an email address.
///
/// Part lengths are checked in bytes before the pattern, so an overlong
/// address is reported as such even when it is also malformed.
pub fn validate_email(email: &str) -> DomainResult<()> {
    let (local, domain) = match email.rfind('@') {
        Some(at) => (&email[..at], &email[at + 1..]),
        None => (email, ""),
    };

    if local.len() > MAX_EMAIL_LOCAL_PART_LENGTH {
        return Err(DomainError::invalid_email(format!(
            "local part must not exceed {} bytes",
            MAX_EMAIL_LOCAL_PART_LENGTH
        )));
    }

    if domain.len() > MAX_EMAIL_DOMAIN_LENGTH {
        return Err(DomainError::invalid_email(format!(
            "domain part must not exceed {} bytes",
            MAX_EMAIL_DOMAIN_LENGTH
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(DomainError::invalid_email(
            "must be of the form local-part@domain",
        ));
    }

    Ok(())
}

/// Validate a plain-text password: 8 to 256 printable ASCII characters,
/// no whitespace.
pub fn validate_password(password: &str) -> DomainResult<()> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len) {
        return Err(DomainError::invalid_password(format!(
            "must be between {} and {} characters long",
            MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
        )));
    }

    if !password.chars().all(|c| c.is_ascii_graphic()) {
        return Err(DomainError::invalid_password(
            "must contain only printable ASCII characters without whitespace",
        ));
    }

    Ok(())
}

/// Validate sign-up data, returning the first failing field.
pub fn validate_user(user: &UserInput) -> DomainResult<()> {
    validate_name(FIELD_FIRST_NAME, &user.first_name, true)?;

    if let Some(last_name) = user.last_name.as_deref() {
        validate_name(FIELD_LAST_NAME, last_name, false)?;
    }

    validate_email(&user.email)?;
    validate_password(&user.password)
}
