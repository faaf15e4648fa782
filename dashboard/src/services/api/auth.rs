//! # Authentication Endpoints
//!
//! SMS registration, login and profile.

use super::client::ApiClient;
use crate::core::error::Result;
use shared::{
    AuthResponse, LoginRequest, OkResponse, RegisterRequest, RequestCodeRequest, UserInfo,
    VerifyCodeRequest,
};

#[tracing::instrument(skip(client), fields(phone = %phone))]
pub async fn request_code(client: &ApiClient, phone: &str) -> Result<OkResponse> {
    tracing::info!("Requesting SMS code");
    let request = RequestCodeRequest {
        phone: phone.to_string(),
    };

    client
        .send(client.client.post(client.url("/register/request_code")).json(&request))
        .await
}

#[tracing::instrument(skip(client, code), fields(phone = %phone))]
pub async fn verify_code(client: &ApiClient, phone: &str, code: &str) -> Result<OkResponse> {
    let request = VerifyCodeRequest {
        phone: phone.to_string(),
        code: code.to_string(),
    };

    client
        .send(client.client.post(client.url("/register/verify_code")).json(&request))
        .await
}

#[tracing::instrument(skip(client, code, password), fields(phone = %phone))]
pub async fn register(
    client: &ApiClient,
    phone: &str,
    code: &str,
    password: &str,
) -> Result<AuthResponse> {
    let request = RegisterRequest {
        phone: phone.to_string(),
        code: code.to_string(),
        password: password.to_string(),
    };

    let response: AuthResponse = client
        .send(client.client.post(client.url("/register")).json(&request))
        .await?;

    tracing::info!(user_id = %response.user.id, "Registration successful");
    Ok(response)
}

/// Login with phone and password.
#[tracing::instrument(skip(client, password), fields(phone = %phone))]
pub async fn login(client: &ApiClient, phone: &str, password: &str) -> Result<AuthResponse> {
    tracing::info!("Attempting login");
    let request = LoginRequest {
        phone: phone.to_string(),
        password: password.to_string(),
    };

    let response: AuthResponse = client
        .send(client.client.post(client.url("/login")).json(&request))
        .await?;

    tracing::info!(user_id = %response.user.id, "Login successful");
    Ok(response)
}

#[tracing::instrument(skip(client, token))]
pub async fn profile(client: &ApiClient, token: &str) -> Result<UserInfo> {
    client
        .send(client.client.get(client.url("/api/profile")).bearer_auth(token))
        .await
}
