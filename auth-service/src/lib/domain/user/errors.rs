use std::fmt;

use thiserror::Error;

use auth::PasswordError;
use auth::TokenError;
use auth::TokenType;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("must be at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("must be at most {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for PersonName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("must be at most {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for password policy failures (length, not strength)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("must be at least {min} characters")]
    TooShort { min: usize },

    #[error("must be at most {max} characters")]
    TooLong { max: usize },
}

/// A single rejected field with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

/// Aggregated sign-up validation failure.
///
/// Carries every offending field, so a caller correcting input sees all
/// problems at once rather than one per round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn fields(&self) -> Vec<&'static str> {
        self.issues.iter().map(|issue| issue.field).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed:")?;
        for (i, issue) in self.issues.iter().enumerate() {
            let sep = if i == 0 { " " } else { "; " };
            write!(f, "{}{}: {}", sep, issue.field, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Top-level error for all authentication operations.
///
/// Credential and token failures are deliberately uninformative at the API
/// boundary; the variants stay distinct here for logging and tests.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Email already exists: {0}")]
    EmailTaken(String),

    #[error("Expected {expected} token, got {actual}")]
    TokenTypeMismatch {
        expected: TokenType,
        actual: TokenType,
    },

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(String),
}
