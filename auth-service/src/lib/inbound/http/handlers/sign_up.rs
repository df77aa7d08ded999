use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::domain::user::models::UserDraft;
use crate::inbound::http::router::AppState;

pub async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<SignUpRequestBody>,
) -> Result<ApiSuccess<SignUpResponseData>, ApiError> {
    state
        .auth_service
        .sign_up(body.into_draft())
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for signing up (raw JSON, validated by the service)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignUpRequestBody {
    username: String,
    email: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    second_name: String,
    password: String,
}

impl SignUpRequestBody {
    fn into_draft(self) -> UserDraft {
        UserDraft {
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            second_name: self.second_name,
            password: self.password,
        }
    }
}

/// Created-user representation; the password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpResponseData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub second_name: String,
}

impl From<&User> for SignUpResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            first_name: user.first_name.as_str().to_string(),
            second_name: user.second_name.as_str().to_string(),
        }
    }
}
