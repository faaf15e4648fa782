//! # Login Tests
//!
//! Tests for phone/password login and the profile endpoint.

use super::*;
use shared::{AuthResponse, LoginRequest, UserInfo};

fn login_request(phone: &str, password: &str) -> Request<Body> {
    post_json(
        "/login",
        &LoginRequest {
            phone: phone.to_string(),
            password: password.to_string(),
        },
    )
}

#[tokio::test]
async fn test_login_success() {
    // Arrange
    let pool = setup_test_db().await;
    let user = seed_user(&pool, PHONE, PASSWORD).await;
    let app = test_app(pool.clone(), Arc::new(RecordingSmsSender::default()));

    // Act
    let (status, json) = send(app, login_request("+7 999 123 45 67", PASSWORD)).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let auth_response: AuthResponse = serde_json::from_value(json).unwrap();
    assert_eq!(auth_response.user.id, user.id.to_string());
    assert_eq!(auth_response.message, "Login successful");
    assert!(!auth_response.token.is_empty());

    let stored = UserRepository::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(stored.last_login.is_some());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let pool = setup_test_db().await;
    seed_user(&pool, PHONE, PASSWORD).await;
    let app = test_app(pool, Arc::new(RecordingSmsSender::default()));

    let (status, json) = send(app, login_request(PHONE, "WrongPassw0rd")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid phone number or password");
}

#[tokio::test]
async fn test_login_unknown_phone_same_message() {
    let pool = setup_test_db().await;
    let app = test_app(pool, Arc::new(RecordingSmsSender::default()));

    let (status, json) = send(app, login_request("79990000000", PASSWORD)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid phone number or password");
}

#[tokio::test]
async fn test_login_deactivated_account() {
    // Arrange
    let pool = setup_test_db().await;
    let user = seed_user(&pool, PHONE, PASSWORD).await;
    UserRepository::set_active(&pool, user.id, false).await.unwrap();
    let app = test_app(pool, Arc::new(RecordingSmsSender::default()));

    // Act
    let (status, json) = send(app, login_request(PHONE, PASSWORD)).await;

    // Assert
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "Forbidden");
}

#[tokio::test]
async fn test_profile_with_token() {
    let (app, token) = setup_test_app().await;
    let request = Request::builder()
        .uri("/api/profile")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    let user: UserInfo = serde_json::from_value(json).unwrap();
    assert_eq!(user.phone, PHONE);
}

#[tokio::test]
async fn test_profile_rejects_bad_tokens() {
    let (app, _) = setup_test_app().await;

    for header in [None, Some("Bearer not-a-jwt"), Some("Token abc")] {
        let mut builder = Request::builder().uri("/api/profile");
        if let Some(value) = header {
            builder = builder.header("authorization", value);
        }

        let (status, json) = send(app.clone(), builder.body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "header {header:?}");
        assert_eq!(json["code"], "Unauthorized");
    }
}
