// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Registration input validation.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Simple `local@domain.tld` shape. Anything stricter rejects addresses that
/// are deliverable in practice.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Possible validation errors. The Display strings are the exact messages
/// the API returns.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Email, name and password are required")]
    MissingFields,

    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),

    #[error("Invalid email address")]
    InvalidEmail,
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if email.is_empty() || !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validate a password. Length is the only requirement; no complexity rules.
/// Length counts characters, not bytes, so multibyte passwords are not
/// held to a stricter bar than ASCII ones.
pub fn validate_password(password: &str, min_length: usize) -> ValidationResult<()> {
    if password.chars().count() < min_length {
        return Err(ValidationError::PasswordTooShort(min_length));
    }
    Ok(())
}

/// Validate a full registration request. First failure wins, in the
/// documented order: presence, password length, email shape.
pub fn validate_registration(
    email: &str,
    name: &str,
    password: &str,
    min_password_length: usize,
) -> ValidationResult<()> {
    if email.is_empty() || name.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    validate_password(password, min_password_length)?;
    validate_email(email)?;
    Ok(())
}
