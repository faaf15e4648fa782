//! # Authentication DTOs
//!
//! Request and response bodies for the SMS registration and login endpoints.
//!
//! ## Registration Flow
//!
//! 1. `POST /register/request_code` - [`RequestCodeRequest`] -> [`OkResponse`]
//! 2. `POST /register/verify_code` - [`VerifyCodeRequest`] -> [`OkResponse`]
//! 3. `POST /register` - [`RegisterRequest`] -> [`AuthResponse`]
//!
//! ## Login
//!
//! - `POST /login` - [`LoginRequest`] -> [`AuthResponse`]
//! - `GET /api/profile` (bearer token) -> [`UserInfo`]
//!
//! Failures on any endpoint carry an [`ErrorResponse`] body.

use serde::{Deserialize, Serialize};

/// Ask the backend to text a verification code to `phone`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestCodeRequest {
    pub phone: String,
}

/// Check a code previously sent to `phone`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyCodeRequest {
    pub phone: String,
    pub code: String,
}

/// Final registration step.
///
/// The code is sent again so the backend can re-check it before creating the
/// account; the verify step alone never creates a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub phone: String,
    pub code: String,
    pub password: String,
}

/// Login with phone and password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

/// Plain acknowledgement for steps that produce no data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OkResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OkResponse {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: Some(message.into()),
        }
    }
}

/// Authentication response (register/login success)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub token: String,
    pub message: String,
}

/// User information (public, safe to send to client)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Account balance in whole rubles.
    #[serde(default)]
    pub balance: i64,
    pub is_active: bool,
    pub created_at: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_wire_names() {
        let request = RegisterRequest {
            phone: "79991234567".to_string(),
            code: "1234".to_string(),
            password: "Passw0rd".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["phone"], "79991234567");
        assert_eq!(json["code"], "1234");
        assert_eq!(json["password"], "Passw0rd");
    }

    #[test]
    fn test_ok_response_omits_empty_message() {
        let json = serde_json::to_string(&OkResponse { ok: true, message: None }).unwrap();
        assert_eq!(json, r#"{"ok":true}"#);
    }

    #[test]
    fn test_error_response_accepts_backend_body() {
        let body = r#"{"error":"Invalid code","code":"InvalidInput"}"#;
        let error: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(error.error, "Invalid code");
        assert_eq!(error.code.as_deref(), Some("InvalidInput"));

        let bare: ErrorResponse = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert!(bare.code.is_none());
    }

    #[test]
    fn test_user_info_defaults_balance() {
        let json = r#"{"id":"7","phone":"79991234567","is_active":true,"created_at":"2024-01-01"}"#;
        let user: UserInfo = serde_json::from_str(json).unwrap();
        assert_eq!(user.balance, 0);
        assert!(user.email.is_none());
    }
}
