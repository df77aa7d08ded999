use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    first_name: String,
    second_name: String,
    password_hash: String,
}

impl UserRow {
    /// Rehydrate domain value objects from a stored row.
    ///
    /// Rows were validated on the way in, so a failure here means the table
    /// was written by something else and is reported as a storage problem.
    fn try_into_user(self) -> Result<User, AuthError> {
        let id = self.id;
        let corrupt = |e: String| AuthError::Database(format!("corrupt user row {id}: {e}"));

        Ok(User {
            id: UserId(id),
            username: Username::new(self.username).map_err(|e| corrupt(e.to_string()))?,
            email: EmailAddress::new(self.email).map_err(|e| corrupt(e.to_string()))?,
            first_name: PersonName::new(self.first_name).map_err(|e| corrupt(e.to_string()))?,
            second_name: PersonName::new(self.second_name).map_err(|e| corrupt(e.to_string()))?,
            password_hash: self.password_hash,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, first_name, second_name, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, first_name, second_name, password_hash
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.first_name.as_str())
        .bind(user.second_name.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_username_key") {
                        return AuthError::UsernameTaken(user.username.as_str().to_string());
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return AuthError::EmailTaken(user.email.as_str().to_string());
                    }
                }
            }
            AuthError::Database(e.to_string())
        })?;

        row.try_into_user()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, first_name, second_name, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

        row.map(UserRow::try_into_user).transpose()
    }
}
