use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn sign_in(
    State(state): State<AppState>,
    Json(body): Json<SignInRequestBody>,
) -> Result<ApiSuccess<SignInResponseData>, ApiError> {
    let pair = state
        .auth_service
        .sign_in(&body.email, &body.password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SignInResponseData {
            access: pair.access,
            refresh: pair.refresh,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInResponseData {
    pub access: String,
    pub refresh: String,
}
