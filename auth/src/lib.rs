//! Authentication primitives library
//!
//! Reusable building blocks for credential-based authentication:
//! - Password hashing and verification (Argon2id)
//! - Signed bearer tokens with typed claims (HS256 JWTs)
//!
//! The service layer composes these with its own user storage; nothing in
//! this crate performs I/O.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("guess", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, TokenCodec, TokenType};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let exp = chrono::Utc::now().timestamp() + 3600;
//! let token = codec.encode(&Claims::new(TokenType::Access, 42, exp)).unwrap();
//! let claims = codec.decode(&token).unwrap();
//! assert_eq!(claims.user_id, 42);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenType;
