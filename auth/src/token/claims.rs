use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Discriminates the two kinds of token this crate issues.
///
/// Serialized as the `type` claim with lowercase wire tags (`access` /
/// `refresh`), matching what existing clients expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived credential for calling protected operations.
    Access,
    /// Credential exchanged only for new access tokens.
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims payload embedded in every token.
///
/// Fixed structure instead of a free-form claim map: the subject id is an
/// integer and the type is an enum, so decoding cannot silently produce a
/// token of the wrong shape. Wire keys are `type`, `user_id`, and `exp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Token kind (`access` or `refresh`).
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Subject user identifier.
    pub user_id: i64,

    /// Expiration instant as a Unix timestamp, whole seconds.
    pub exp: i64,
}

impl Claims {
    pub fn new(token_type: TokenType, user_id: i64, exp: i64) -> Self {
        Self {
            token_type,
            user_id,
            exp,
        }
    }

    /// Whether the token is expired at `now` (Unix seconds).
    ///
    /// A token expiring exactly now is treated as expired.
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp <= now
    }
}
