// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Request body validation.

use regex::Regex;
use starboard_common::{Credentials, NewFavorite};
use std::sync::LazyLock;
use thiserror::Error;

use crate::error::AppError;

const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_FIELD_LENGTH: usize = 200;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .unwrap_or_else(|e| panic!("email pattern must compile: {e}"))
});

/// Possible validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid favorite: {0}")]
    InvalidFavorite(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "Email address cannot be empty".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "Email address cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(
            "Invalid email address format".to_string(),
        ));
    }

    Ok(email)
}

/// Validate a password chosen at sign-up
pub fn validate_password(password: &str) -> ValidationResult<&str> {
    if password.is_empty() {
        return Err(ValidationError::InvalidPassword(
            "Password must not be empty".to_string(),
        ));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "Password cannot exceed {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(password)
}

/// Validate sign-up credentials
pub fn validate_credentials(credentials: &Credentials) -> ValidationResult<()> {
    validate_email(&credentials.email)?;
    validate_password(&credentials.password)?;
    Ok(())
}

/// Validate a favorite before it is stored
pub fn validate_favorite(favorite: &NewFavorite) -> ValidationResult<()> {
    if favorite.name.trim().is_empty() {
        return Err(ValidationError::InvalidFavorite(
            "Name must not be empty".to_string(),
        ));
    }

    let fields = [
        &favorite.name,
        &favorite.birth_year,
        &favorite.mass,
        &favorite.height,
        &favorite.eye_color,
    ];
    if fields.iter().any(|field| field.len() > MAX_FIELD_LENGTH) {
        return Err(ValidationError::InvalidFavorite(format!(
            "Fields cannot exceed {MAX_FIELD_LENGTH} characters"
        )));
    }

    Ok(())
}
