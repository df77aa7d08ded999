use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;

use auth::Claims;
use auth::PasswordHasher;
use auth::TokenCodec;
use auth::TokenType;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::UserDraft;
use crate::domain::user::models::UserId;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Authentication domain service.
///
/// Orchestrates credential hashing, token issuance, and user persistence.
/// The signing secret and the repository handle are injected once at
/// construction; there is no other state.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    token_ttl: Duration,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new authentication service.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `jwt_secret` - Shared secret for token signing
    /// * `token_ttl_hours` - Lifetime of issued tokens, both kinds
    pub fn new(repository: Arc<UR>, jwt_secret: &[u8], token_ttl_hours: i64) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(jwt_secret),
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }

    fn issue_token(&self, user_id: UserId, token_type: TokenType) -> Result<String, AuthError> {
        let expires_at = (Utc::now() + self.token_ttl).timestamp();
        let claims = Claims::new(token_type, user_id.0, expires_at);

        Ok(self.token_codec.encode(&claims)?)
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn sign_up(&self, draft: UserDraft) -> Result<User, AuthError> {
        let command = draft.validate()?;

        let password_hash = self.password_hasher.hash(&command.password)?;

        let created_user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                first_name: command.first_name,
                second_name: command.second_name,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %created_user.id, "user signed up");

        Ok(created_user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        // Unknown email and wrong password take the same exit.
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // A hash that cannot be verified fails sign-in the same way a wrong
        // password does; the underlying cause only goes to the logs.
        let matches = match self.password_hasher.verify(password, &user.password_hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "password verification failed");
                return Err(AuthError::InvalidCredentials);
            }
        };
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let access = self.issue_token(user.id, TokenType::Access)?;
        let refresh = self.issue_token(user.id, TokenType::Refresh)?;

        tracing::debug!(user_id = %user.id, "token pair issued");

        Ok(TokenPair { access, refresh })
    }

    fn validate_token(&self, token: &str, expected_type: TokenType) -> Result<UserId, AuthError> {
        let claims = self.token_codec.decode(token)?;

        if claims.token_type != expected_type {
            return Err(AuthError::TokenTypeMismatch {
                expected: expected_type,
                actual: claims.token_type,
            });
        }

        Ok(UserId(claims.user_id))
    }

    fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AuthError> {
        let user_id = self.validate_token(refresh_token, TokenType::Refresh)?;

        self.issue_token(user_id, TokenType::Access)
    }
}
