//! # Authentication Handlers
//!
//! HTTP request handlers for SMS registration and phone/password login.
//!
//! ## Registration Flow
//!
//! 1. `POST /register/request_code` stores a fresh 4-digit code (replacing any
//!    previous one for the phone) and sends it through the configured [`SmsSender`].
//! 2. `POST /register/verify_code` checks the code. Nothing is created yet.
//! 3. `POST /register` re-checks the code, creates the account, deletes the code
//!    and returns a bearer token.
//!
//! Phones are normalized to 11 digits before any lookup, so `+7 (999) 123-45-67`
//! and `79991234567` address the same account.

use std::sync::Arc;

use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};
use lib_auth::{encode_jwt, hash_password, verify_password, Claims};
use lib_core::model::store::{User, UserForCreate, UserRepository, VerificationRepository};
use lib_core::{AppError, Config, DbPool};
use lib_utils::time::format_time;
use lib_utils::validation::{
    validate_login_password, validate_password, validate_phone, validate_sms_code,
};
use shared::{
    AuthResponse, LoginRequest, OkResponse, RegisterRequest, RequestCodeRequest, UserInfo,
    VerifyCodeRequest,
};
use tracing::{debug, error, info, instrument, warn};

use crate::services::sms::{generate_code, SmsSender};

/// Public view of a stored user.
pub fn user_info(user: &User) -> UserInfo {
    UserInfo {
        id: user.id.to_string(),
        phone: user.phone.clone(),
        email: None,
        balance: user.balance,
        is_active: user.is_active,
        created_at: format_time(user.created_at),
    }
}

fn issue_token(user: &User, config: &Config) -> Result<String, AppError> {
    encode_jwt(
        user.id,
        user.phone.clone(),
        &config.jwt_secret,
        config.jwt_expiration_hours,
    )
    .map_err(|e| {
        error!("[AUTH] JWT encoding failed: {}", e);
        AppError::Internal(e)
    })
}

fn normalized_phone(raw: &str) -> Result<String, AppError> {
    validate_phone(raw).map_err(AppError::InvalidInput)
}

/// Generate a verification code and text it to the phone.
///
/// # Errors
///
/// * `400` - malformed phone
/// * `502` - the SMS provider refused the message
#[instrument(skip(pool, sms, req), fields(phone = %req.phone))]
pub async fn request_code(
    State(pool): State<DbPool>,
    State(sms): State<Arc<dyn SmsSender>>,
    Json(req): Json<RequestCodeRequest>,
) -> Result<Json<OkResponse>, AppError> {
    info!("[REGISTER] Code requested");
    let phone = normalized_phone(&req.phone)?;

    let code = generate_code();
    VerificationRepository::replace_code(&pool, &phone, &code).await?;
    debug!("[REGISTER] Stored new code for {}", phone);

    sms.send_code(&phone, &code).await?;

    info!("[REGISTER] Code sent to {}", phone);
    Ok(Json(OkResponse::with_message("Code sent")))
}

/// Check a previously sent code without consuming it.
#[instrument(skip(pool, req), fields(phone = %req.phone))]
pub async fn verify_code(
    State(pool): State<DbPool>,
    Json(req): Json<VerifyCodeRequest>,
) -> Result<Json<OkResponse>, AppError> {
    let phone = normalized_phone(&req.phone)?;
    validate_sms_code(&req.code).map_err(AppError::InvalidInput)?;

    if VerificationRepository::find_code(&pool, &phone, &req.code)
        .await?
        .is_none()
    {
        warn!("[REGISTER] Wrong code for {}", phone);
        return Err(AppError::InvalidInput("Invalid code".to_string()));
    }

    info!("[REGISTER] Code verified for {}", phone);
    Ok(Json(OkResponse::with_message("Code verified")))
}

/// Create the account once the code checks out.
///
/// # Returns
///
/// * `201` with [`AuthResponse`] on success
/// * `400` for invalid input or a wrong code
/// * `409` if the phone is already registered
#[instrument(skip(pool, config, req), fields(phone = %req.phone))]
pub async fn register(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("[REGISTER] NEW ACCOUNT REQUEST");

    let phone = normalized_phone(&req.phone)?;
    validate_sms_code(&req.code).map_err(AppError::InvalidInput)?;
    validate_password(&req.password).map_err(AppError::InvalidInput)?;

    if VerificationRepository::find_code(&pool, &phone, &req.code)
        .await?
        .is_none()
    {
        warn!("[REGISTER] Wrong confirmation code for {}", phone);
        return Err(AppError::InvalidInput("Invalid confirmation code".to_string()));
    }

    if UserRepository::find_by_phone(&pool, &phone).await?.is_some() {
        warn!("[REGISTER] Phone already registered: {}", phone);
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    debug!("[REGISTER] Hashing password...");
    let password_hash = hash_password(&req.password).map_err(AppError::InvalidInput)?;

    let user = UserRepository::create(&pool, UserForCreate::new(phone.clone(), password_hash)).await?;
    VerificationRepository::delete_for_phone(&pool, &phone).await?;

    let token = issue_token(&user, &config)?;

    info!("[REGISTER] Account created");
    info!("   User ID: {}", user.id);
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user_info(&user),
            token,
            message: "Registration successful".to_string(),
        }),
    ))
}

/// Authenticate with phone and password.
///
/// Unknown phone and wrong password give the same `400` so the endpoint does
/// not reveal which phones are registered. Deactivated accounts get `403`.
#[instrument(skip(pool, config, req), fields(phone = %req.phone))]
pub async fn login(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    info!("[LOGIN] LOGIN ATTEMPT");

    let invalid = || AppError::InvalidInput("Invalid phone number or password".to_string());

    let phone = validate_phone(&req.phone).map_err(|_| invalid())?;
    validate_login_password(&req.password).map_err(AppError::InvalidInput)?;

    let user = UserRepository::find_by_phone(&pool, &phone).await?.ok_or_else(|| {
        warn!("[LOGIN] Unknown phone: {}", phone);
        invalid()
    })?;

    debug!("[LOGIN] Verifying password...");
    let is_valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
        error!("[LOGIN] Password verification error: {}", e);
        AppError::Internal(e)
    })?;

    if !is_valid {
        warn!("[LOGIN] Invalid password for user: {}", user.id);
        return Err(invalid());
    }

    if !user.is_active {
        warn!("[LOGIN] Account deactivated: {}", user.id);
        return Err(AppError::Forbidden("Account is deactivated".to_string()));
    }

    UserRepository::update_last_login(&pool, user.id).await?;
    let token = issue_token(&user, &config)?;

    info!("[LOGIN] User {} authenticated", user.id);

    Ok(Json(AuthResponse {
        user: user_info(&user),
        token,
        message: "Login successful".to_string(),
    }))
}

/// Current user for a valid bearer token.
///
/// A token whose account no longer exists is treated as unauthorized.
#[instrument(skip(pool, claims), fields(user_id = %claims.sub))]
pub async fn profile(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserInfo>, AppError> {
    let user_id = claims.user_id().map_err(AppError::Unauthorized)?;

    let user = UserRepository::find_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account not found".to_string()))?;

    Ok(Json(user_info(&user)))
}

#[cfg(test)]
pub(crate) mod tests;
