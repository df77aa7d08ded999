mod common;

use axum::http::StatusCode;
use chrono::Duration;
use chrono::Utc;
use serde_json::json;

use auth::Claims;
use auth::TokenCodec;
use auth::TokenType;
use common::TestApp;
use common::JWT_SECRET;

#[tokio::test]
async fn test_sign_up_success() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/api/v1/auth/sign-up",
            &json!({
                "username": "bob12",
                "email": "bob@x.com",
                "first_name": "B",
                "second_name": "K",
                "password": "longenough1"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["username"], "bob12");
    assert_eq!(body["data"]["email"], "bob@x.com");
    // No hash or password in the external representation.
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_sign_up_short_password() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/api/v1/auth/sign-up",
            &json!({
                "username": "bob12",
                "email": "bob@x.com",
                "first_name": "B",
                "second_name": "K",
                "password": "short"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = body["data"]["message"].as_str().unwrap();
    assert!(message.contains("password"), "got: {message}");
}

#[tokio::test]
async fn test_sign_up_duplicate_email() {
    let app = TestApp::new();

    let user = json!({
        "username": "bob12",
        "email": "bob@x.com",
        "first_name": "B",
        "second_name": "K",
        "password": "longenough1"
    });
    let (status, _) = app.post_json("/api/v1/auth/sign-up", &user).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut other = user.clone();
    other["username"] = json!("bob13");
    let (status, _) = app.post_json("/api/v1/auth/sign-up", &other).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_sign_in_returns_typed_token_pair() {
    let app = TestApp::new();
    let (access, refresh) = app.sign_up_and_sign_in().await;

    let codec = TokenCodec::new(JWT_SECRET);
    let access_claims = codec.decode(&access).unwrap();
    let refresh_claims = codec.decode(&refresh).unwrap();

    assert_eq!(access_claims.token_type, TokenType::Access);
    assert_eq!(refresh_claims.token_type, TokenType::Refresh);
    assert_eq!(access_claims.user_id, refresh_claims.user_id);
}

#[tokio::test]
async fn test_sign_in_failures_share_one_response() {
    let app = TestApp::new();
    app.sign_up_and_sign_in().await;

    let (wrong_pw_status, wrong_pw_body) = app
        .post_json(
            "/api/v1/auth/sign-in",
            &json!({"email": "bob@x.com", "password": "wrongpassword"}),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .post_json(
            "/api/v1/auth/sign-in",
            &json!({"email": "nobody@x.com", "password": "longenough1"}),
        )
        .await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    // Identical bodies; nothing distinguishes an unknown email.
    assert_eq!(wrong_pw_body, unknown_body);
}

#[tokio::test]
async fn test_refresh_returns_new_access_token() {
    let app = TestApp::new();
    let (original_access, refresh) = app.sign_up_and_sign_in().await;

    // Tokens carry whole-second expiries, so cross a second boundary to get
    // a distinguishable access token out of the exchange.
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let (status, body) = app
        .post_json("/api/v1/auth/refresh", &json!({"refresh": refresh}))
        .await;

    assert_eq!(status, StatusCode::OK);
    let access = body["data"]["access"].as_str().unwrap();
    assert_ne!(access, original_access);

    let claims = TokenCodec::new(JWT_SECRET).decode(access).unwrap();
    assert_eq!(claims.token_type, TokenType::Access);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new();
    let (access, _) = app.sign_up_and_sign_in().await;

    let (status, _) = app
        .post_json("/api/v1/auth/refresh", &json!({"refresh": access}))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_valid_token() {
    let app = TestApp::new();
    let (access, _) = app.sign_up_and_sign_in().await;

    let (status, body) = app
        .get("/api/v1/me", Some(&format!("Bearer {access}")))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user_id"], 1);
}

#[tokio::test]
async fn test_protected_route_without_header() {
    let app = TestApp::new();

    let (status, _) = app.get("/api/v1/me", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_wrong_scheme() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/v1/me", Some("Basic abc")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    // Same body as every other rejection.
    let (_, no_header_body) = app.get("/api/v1/me", None).await;
    assert_eq!(body, no_header_body);
}

#[tokio::test]
async fn test_protected_route_with_expired_token() {
    let app = TestApp::new();
    app.sign_up_and_sign_in().await;

    let expired = TokenCodec::new(JWT_SECRET)
        .encode(&Claims::new(
            TokenType::Access,
            1,
            (Utc::now() - Duration::hours(1)).timestamp(),
        ))
        .unwrap();

    let (status, _) = app
        .get("/api/v1/me", Some(&format!("Bearer {expired}")))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_rejects_refresh_token() {
    let app = TestApp::new();
    let (_, refresh) = app.sign_up_and_sign_in().await;

    let (status, _) = app
        .get("/api/v1/me", Some(&format!("Bearer {refresh}")))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
