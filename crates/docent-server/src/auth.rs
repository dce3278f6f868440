//! Password hashing and request authentication.
//!
//! Passwords are stored as Argon2id PHC strings
//! (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`), so the parameters
//! travel with each hash.

use crate::handlers::{AppError, AppState};
use crate::session::TokenType;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use docent_domain::UserId;
use rand::rngs::OsRng;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored PHC string
///
/// Malformed hashes never verify.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(encoded) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Registration password rules; returns the first violated rule
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(format!(
            "This password is too short. It must contain at least {} characters.",
            MIN_PASSWORD_CHARS
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err("This password is entirely numeric.".to_string());
    }
    Ok(())
}

/// The authenticated caller, taken from `Authorization: Bearer <access token>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub UserId);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized("Authentication credentials were not provided.".to_string())
            })?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Invalid authorization header".to_string()))?;

        let claims = state.sessions.validate(token, TokenType::Access)?;
        Ok(AuthUser(claims.user()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{Algorithm, Params, Version};

    #[test]
    fn test_hash_and_verify() {
        let encoded = hash_password("correct horse").unwrap();
        assert!(encoded.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &encoded));
        assert!(!verify_password("wrong horse", &encoded));
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn test_verify_uses_stored_parameters() {
        let params = Params::new(1024, 1, 1, None).unwrap();
        let hasher = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let encoded = hasher.hash_password(b"pw", &salt).unwrap().to_string();

        assert!(encoded.contains("m=1024,t=1,p=1"));
        assert!(verify_password("pw", &encoded));
        assert!(!verify_password("pw2", &encoded));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        for encoded in ["", "argon2id", "sha256$100000$00$00", "$argon2id$v=19$garbage", "$md5$abc$def"] {
            assert!(!verify_password("anything", encoded), "{} verified", encoded);
        }
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").unwrap_err().contains("too short"));
        assert!(validate_password("1234567890").unwrap_err().contains("entirely numeric"));
    }
}
