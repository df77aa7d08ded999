use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequestBody>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    state
        .auth_service
        .refresh_access_token(&body.refresh)
        .map_err(ApiError::from)
        .map(|access| ApiSuccess::new(StatusCode::OK, RefreshResponseData { access }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequestBody {
    refresh: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub access: String,
}
