use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use tower::ServiceExt;

use auth_service::domain::user::errors::AuthError;
use auth_service::domain::user::models::NewUser;
use auth_service::domain::user::models::User;
use auth_service::domain::user::models::UserId;
use auth_service::domain::user::ports::UserRepository;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::router::create_router;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory user repository with the same uniqueness rules as Postgres.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();

        if users
            .iter()
            .any(|u| u.username.as_str() == user.username.as_str())
        {
            return Err(AuthError::UsernameTaken(user.username.to_string()));
        }
        if users.iter().any(|u| u.email.as_str() == user.email.as_str()) {
            return Err(AuthError::EmailTaken(user.email.as_str().to_string()));
        }

        let created = User {
            id: UserId(users.len() as i64 + 1),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            second_name: user.second_name,
            password_hash: user.password_hash,
        };
        users.push(created.clone());

        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }
}

/// Test application driving the real router in-process.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryUserRepository::default());
        let auth_service = Arc::new(AuthService::new(repository, JWT_SECRET, 24));

        Self {
            router: create_router(auth_service),
        }
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn get(
        &self,
        path: &str,
        authorization: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = builder.body(Body::empty()).expect("Failed to build request");

        self.send(request).await
    }

    /// Sign up a default user and return its sign-in token pair.
    pub async fn sign_up_and_sign_in(&self) -> (String, String) {
        let (status, _) = self
            .post_json(
                "/api/v1/auth/sign-up",
                &serde_json::json!({
                    "username": "bob12",
                    "email": "bob@x.com",
                    "first_name": "B",
                    "second_name": "K",
                    "password": "longenough1"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .post_json(
                "/api/v1/auth/sign-in",
                &serde_json::json!({
                    "email": "bob@x.com",
                    "password": "longenough1"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        (
            body["data"]["access"].as_str().unwrap().to_string(),
            body["data"]["refresh"].as_str().unwrap().to_string(),
        )
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Failed to parse response body")
        };

        (status, json)
    }
}
