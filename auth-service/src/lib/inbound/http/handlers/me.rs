use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Protected endpoint returning the caller's token subject.
///
/// The id comes straight from the validated token; it is not re-checked
/// against storage.
pub async fn me(
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        MeResponseData {
            user_id: user.user_id.0,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub user_id: i64,
}
