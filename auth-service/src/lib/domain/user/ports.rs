use async_trait::async_trait;

use auth::TokenType;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::UserDraft;
use crate::domain::user::models::UserId;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Validate a sign-up draft, hash its password, and persist the user.
    ///
    /// # Returns
    /// Created user entity (hash present, plaintext gone)
    ///
    /// # Errors
    /// * `Validation` - One or more draft fields are invalid
    /// * `UsernameTaken` / `EmailTaken` - Uniqueness conflict from storage
    /// * `Password` - Hashing failed
    /// * `Database` - Storage operation failed
    async fn sign_up(&self, draft: UserDraft) -> Result<User, AuthError>;

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// An unknown email and a wrong password fail identically so callers
    /// cannot probe which addresses are registered.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Email unknown or password does not match
    /// * `Token` - Token issuance failed
    /// * `Database` - Storage operation failed
    async fn sign_in(&self, email: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Decode a token and check it is of the expected type.
    ///
    /// # Returns
    /// The subject user id embedded in the token
    ///
    /// # Errors
    /// * `Token` - Malformed, badly signed, or expired token
    /// * `TokenTypeMismatch` - Token is valid but of the other type
    fn validate_token(&self, token: &str, expected_type: TokenType) -> Result<UserId, AuthError>;

    /// Exchange a valid refresh token for a fresh access token.
    ///
    /// # Errors
    /// * `Token` / `TokenTypeMismatch` - Refresh token did not validate
    fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AuthError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user and return it with its assigned id.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `EmailTaken` - Email is already registered
    /// * `Database` - Storage operation failed
    async fn create(&self, user: NewUser) -> Result<User, AuthError>;

    /// Retrieve a user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
}
