use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::FieldIssue;
use crate::domain::user::errors::NameError;
use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::UsernameError;
use crate::domain::user::errors::ValidationError;

/// User aggregate entity.
///
/// Only the password hash crosses the storage boundary; the plaintext is
/// discarded before a `User` is ever constructed.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub first_name: PersonName,
    pub second_name: PersonName,
    pub password_hash: String,
}

/// User unique identifier, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type, 3 to 30 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 30;

    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(username))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type, validated with an RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// First or second name, at most 50 characters. May be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 50;

    pub fn new(name: String) -> Result<Self, NameError> {
        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_MAX_LENGTH: usize = 256;

fn check_password(password: &str) -> Result<(), PasswordPolicyError> {
    let length = password.chars().count();
    if length < PASSWORD_MIN_LENGTH {
        Err(PasswordPolicyError::TooShort {
            min: PASSWORD_MIN_LENGTH,
        })
    } else if length > PASSWORD_MAX_LENGTH {
        Err(PasswordPolicyError::TooLong {
            max: PASSWORD_MAX_LENGTH,
        })
    } else {
        Ok(())
    }
}

/// Raw sign-up input as received from the caller, before validation.
///
/// Debug output redacts the password so a draft can never leak the
/// plaintext through logging.
#[derive(Clone)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub second_name: String,
    pub password: String,
}

impl UserDraft {
    /// Validate every field, collecting all failures.
    ///
    /// # Returns
    /// A sign-up command with validated value objects and the still-plaintext
    /// password (hashed by the service, never stored)
    ///
    /// # Errors
    /// * `ValidationError` - One issue per offending field
    pub fn validate(self) -> Result<SignUpCommand, ValidationError> {
        let mut issues = Vec::new();

        let username = Username::new(self.username)
            .map_err(|e| issues.push(FieldIssue {
                field: "username",
                message: e.to_string(),
            }))
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|e| issues.push(FieldIssue {
                field: "email",
                message: e.to_string(),
            }))
            .ok();
        let first_name = PersonName::new(self.first_name)
            .map_err(|e| issues.push(FieldIssue {
                field: "first_name",
                message: e.to_string(),
            }))
            .ok();
        let second_name = PersonName::new(self.second_name)
            .map_err(|e| issues.push(FieldIssue {
                field: "second_name",
                message: e.to_string(),
            }))
            .ok();
        if let Err(e) = check_password(&self.password) {
            issues.push(FieldIssue {
                field: "password",
                message: e.to_string(),
            });
        }

        match (username, email, first_name, second_name) {
            (Some(username), Some(email), Some(first_name), Some(second_name))
                if issues.is_empty() =>
            {
                Ok(SignUpCommand {
                    username,
                    email,
                    first_name,
                    second_name,
                    password: self.password,
                })
            }
            _ => Err(ValidationError { issues }),
        }
    }
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDraft")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("second_name", &self.second_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated command to sign up a new user.
pub struct SignUpCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub first_name: PersonName,
    pub second_name: PersonName,
    pub password: String,
}

impl fmt::Debug for SignUpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpCommand")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("second_name", &self.second_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// User fields handed to storage for creation; the id is assigned there.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub first_name: PersonName,
    pub second_name: PersonName,
    pub password_hash: String,
}

/// Access and refresh token issued together at sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}
