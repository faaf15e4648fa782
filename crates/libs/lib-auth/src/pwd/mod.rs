//! # Password Hashing
//!
//! Password hashing and verification using Argon2.
//!
//! Hashing enforces the account password rules from
//! [`lib_utils::validation::validate_password`], so a weak password never
//! reaches storage even if a caller skipped validation.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lib_utils::validation::validate_password;

/// Hash a password using the Argon2 algorithm.
pub fn hash_password(password: &str) -> Result<String, String> {
    validate_password(password)?;

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("Failed to hash password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against an Argon2 hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| format!("Failed to parse hash: {}", e))?;

    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let password = "Passw0rd";
        let hash = hash_password(password)
            .expect("Password hashing should succeed for valid password");

        assert!(verify_password(password, &hash)
            .expect("Password verification should succeed for correct password"));
        assert!(!verify_password("WrongPassw0rd", &hash)
            .expect("Password verification should fail for incorrect password"));
    }

    #[test]
    fn test_weak_password_rejected() {
        let result = hash_password("short");
        assert_eq!(
            result.expect_err("Hash should fail for short password"),
            "Password must be at least 8 characters"
        );

        assert!(hash_password("alllowercase1").is_err());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_password("Passw0rd", "not-a-phc-string").is_err());
    }
}
