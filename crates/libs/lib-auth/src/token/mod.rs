//! # JWT Token Management
//!
//! Bearer tokens issued on registration and login, checked by the auth middleware.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT Claims structure containing user authentication information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Normalized phone number
    pub phone: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Numeric user id carried in `sub`.
    pub fn user_id(&self) -> Result<i64, String> {
        self.sub
            .parse()
            .map_err(|_| format!("Invalid subject in token: {}", self.sub))
    }
}

/// Encode a JWT token with user claims.
pub fn encode_jwt(
    user_id: i64,
    phone: String,
    secret: &str,
    expiration_hours: i64,
) -> Result<String, String> {
    let now = Utc::now();
    let exp = now + Duration::hours(expiration_hours);

    let claims = Claims {
        sub: user_id.to_string(),
        phone,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("Failed to encode JWT: {}", e))
}

/// Decode and validate a JWT token.
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, String> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| format!("Failed to decode JWT: {}", e))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-must-be-at-least-32-chars-long!";

    #[test]
    fn test_jwt_encoding_decoding() {
        let token = encode_jwt(1, "79991234567".to_string(), SECRET, 24)
            .expect("JWT encoding should succeed");
        let claims = decode_jwt(&token, SECRET)
            .expect("JWT decoding should succeed");

        assert_eq!(claims.user_id().unwrap(), 1);
        assert_eq!(claims.phone, "79991234567");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_jwt_wrong_secret_rejected() {
        let token = encode_jwt(1, "79991234567".to_string(), SECRET, 24).unwrap();
        assert!(decode_jwt(&token, "another-secret-key-that-is-32-chars-long").is_err());
    }

    #[test]
    fn test_jwt_expired_rejected() {
        // Well past the default 60s leeway
        let token = encode_jwt(1, "79991234567".to_string(), SECRET, -2).unwrap();
        assert!(decode_jwt(&token, SECRET).is_err());
    }
}
