//! # Auth Handler Tests
//!
//! Registration and login tests driven through the real router.

mod login;

use crate::server::{create_router, AppState};
use crate::services::sms::SmsSender;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use lib_auth::hash_password;
use lib_core::model::store::{User, UserForCreate, UserRepository};
use lib_core::{run_migrations, AppError, Config, DbPool};
use parking_lot::Mutex;
use serde::Serialize;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

pub const PHONE: &str = "79991234567";
pub const PASSWORD: &str = "Passw0rd";

/// SMS sender that records every message instead of sending it.
#[derive(Default)]
pub struct RecordingSmsSender {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl RecordingSmsSender {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Last code texted to `phone`.
    pub fn last_code(&self, phone: &str) -> Option<String> {
        self.sent
            .lock()
            .iter()
            .rev()
            .find(|(to, _)| to == phone)
            .map(|(_, code)| code.clone())
    }
}

#[async_trait]
impl SmsSender for RecordingSmsSender {
    async fn send_code(&self, phone: &str, code: &str) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Sms("provider down".to_string()));
        }
        self.sent.lock().push((phone.to_string(), code.to_string()));
        Ok(())
    }
}

/// Setup in-memory test database with schema
pub async fn setup_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    run_migrations(&pool).await.expect("Failed to run migrations");

    pool
}

/// Create test config
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
        jwt_expiration_hours: 24,
        smsru_api_id: None,
        bind_address: "127.0.0.1:0".to_string(),
    }
}

/// Create test app with all routes
pub fn test_app(pool: DbPool, sms: Arc<RecordingSmsSender>) -> Router {
    let state = AppState {
        db: pool,
        config: test_config(),
        sms,
    };
    create_router(state, Vec::new())
}

pub async fn seed_user(pool: &DbPool, phone: &str, password: &str) -> User {
    let password_hash = hash_password(password).expect("Password hashing should succeed in test");
    UserRepository::create(pool, UserForCreate::new(phone.to_string(), password_hash))
        .await
        .expect("User creation should succeed in test")
}

/// App with one registered user, plus a bearer token for that user.
pub async fn setup_test_app() -> (Router, String) {
    let pool = setup_test_db().await;
    let user = seed_user(&pool, PHONE, PASSWORD).await;
    let config = test_config();
    let token = lib_auth::encode_jwt(user.id, user.phone, &config.jwt_secret, 1)
        .expect("JWT encoding should succeed in test");

    (test_app(pool, Arc::new(RecordingSmsSender::default())), token)
}

pub fn post_json<T: Serialize>(uri: &str, body: &T) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub fn authorized_json<T: Serialize>(uri: &str, body: &T, token: &str) -> Request<Body> {
    let mut request = post_json(uri, body);
    request.headers_mut().insert(
        "authorization",
        format!("Bearer {}", token).parse().unwrap(),
    );
    request
}

/// Send one request; non-JSON bodies come back as `Value::Null`.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}
