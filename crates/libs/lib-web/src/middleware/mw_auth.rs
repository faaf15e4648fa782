//! # Authentication Middleware
//!
//! Axum middleware for JWT token validation and user authentication.
//!
//! This middleware extracts and validates JWT tokens from the `Authorization` header,
//! then injects the authenticated user's claims into the request extensions.
//! The signing secret comes from the [`Config`] held in router state.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::{middleware::from_fn_with_state, routing::get, Router};
//! use lib_web::middleware::mw_auth::require_auth;
//!
//! let protected = Router::new()
//!     .route("/api/profile", get(profile))
//!     .route_layer(from_fn_with_state(config.clone(), require_auth));
//! ```
//!
//! Handlers can then extract claims using `Extension<Claims>`:
//!
//! ```rust,ignore
//! use axum::extract::Extension;
//! use lib_auth::Claims;
//!
//! async fn profile(Extension(claims): Extension<Claims>) -> String {
//!     format!("Hello, {}!", claims.phone)
//! }
//! ```

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use lib_auth::decode_jwt;
use lib_core::{AppError, Config};
use tracing::{debug, warn};

/// Authentication middleware that validates JWT tokens.
///
/// # Behavior
///
/// - **Valid token**: Continues to next middleware/handler with `Claims` in extensions
/// - **Missing/invalid token**: Returns `401 Unauthorized` with a JSON error body
pub async fn require_auth(
    State(config): State<Config>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            warn!("[AUTH] Missing Authorization header");
            AppError::Unauthorized("Authorization required".to_string())
        })?;

    // Extract Bearer token
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("[AUTH] Invalid Authorization header format");
        AppError::Unauthorized("Authorization required".to_string())
    })?;

    // Decode and validate JWT
    let claims = decode_jwt(token, &config.jwt_secret).map_err(|e| {
        warn!("[AUTH] JWT validation failed: {}", e);
        AppError::Unauthorized("Session expired, please sign in again".to_string())
    })?;

    debug!("[AUTH] Authenticated user: {} (id: {})", claims.phone, claims.sub);

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
