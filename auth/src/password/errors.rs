use thiserror::Error;

/// Error type for password operations.
///
/// A wrong password is not an error; verify reports it as `false`. These
/// variants signal configuration or data problems and are treated as fatal
/// by callers.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    InvalidHash(String),
}
