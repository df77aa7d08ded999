use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use auth::TokenType;

use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type carrying the authenticated subject into handlers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware gating protected routes on a valid access token.
///
/// Every rejection produces the same response; a missing header, a wrong
/// scheme, a bad signature, and an expired token are indistinguishable to
/// the caller. The specific reason is only logged.
pub async fn require_access_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req).ok_or_else(|| {
        tracing::debug!("request without bearer credentials");
        unauthorized()
    })?;

    let user_id = state
        .auth_service
        .validate_token(token, TokenType::Access)
        .map_err(|e| {
            tracing::warn!(error = %e, "access token rejected");
            unauthorized()
        })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized"
        })),
    )
        .into_response()
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
