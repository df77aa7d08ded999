use thiserror::Error;

/// Error type for token encode/decode operations.
///
/// Callers surface all decode variants uniformly as unauthorized; the
/// distinction exists for logging and tests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Signing secret is empty")]
    EmptySecret,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token is expired")]
    Expired,
}
