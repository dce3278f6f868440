//! Session management with JWT tokens.
//!
//! Login hands out an access/refresh pair. Access tokens authenticate API
//! calls; refresh tokens only mint new access tokens and are the ones logout
//! revokes, keyed by their `jti`.

use docent_domain::UserId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

/// Session management error
#[derive(Debug, Error)]
pub enum SessionError {
    /// JWT encoding failed
    #[error("Failed to encode JWT: {0}")]
    JwtEncode(#[from] jsonwebtoken::errors::Error),

    /// Token expired
    #[error("Token is expired")]
    TokenExpired,

    /// Invalid token, or a token of the wrong type
    #[error("Token is invalid")]
    InvalidToken,
}

/// Which job a token does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Authenticates API requests
    Access,
    /// Exchanged for new access tokens
    Refresh,
}

/// JWT claims carried by both token types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Authenticated user
    pub user_id: i64,

    /// Token expiration timestamp (Unix epoch)
    pub exp: u64,

    /// Issued at timestamp (Unix epoch)
    pub iat: u64,

    /// Unique token identifier
    pub jti: String,

    /// Access or refresh
    pub token_type: TokenType,
}

impl TokenClaims {
    /// The user the token was issued to
    pub fn user(&self) -> UserId {
        UserId::new(self.user_id)
    }
}

/// Access and refresh token issued together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Long-lived refresh token
    pub refresh: String,
    /// Short-lived access token
    pub access: String,
}

/// Session manager handles JWT token generation and validation
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_expiry_secs: u64,
    refresh_expiry_secs: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl SessionManager {
    /// Create a new session manager with the given JWT secret and expiries
    pub fn new(jwt_secret: &str, access_expiry_secs: u64, refresh_expiry_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            access_expiry_secs,
            refresh_expiry_secs,
        }
    }

    /// Issue a fresh access/refresh pair for a user
    pub fn issue_pair(&self, user_id: UserId) -> Result<TokenPair, SessionError> {
        Ok(TokenPair {
            refresh: self.issue(user_id, TokenType::Refresh)?,
            access: self.issue(user_id, TokenType::Access)?,
        })
    }

    /// Issue a single token
    pub fn issue(&self, user_id: UserId, token_type: TokenType) -> Result<String, SessionError> {
        let now = now_secs();
        let lifetime = match token_type {
            TokenType::Access => self.access_expiry_secs,
            TokenType::Refresh => self.refresh_expiry_secs,
        };

        let claims = TokenClaims {
            user_id: user_id.value(),
            exp: now + lifetime,
            iat: now,
            jti: Uuid::now_v7().to_string(),
            token_type,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token of the expected type and extract claims
    pub fn validate(&self, token: &str, expected: TokenType) -> Result<TokenClaims, SessionError> {
        let validation = Validation::default();
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::TokenExpired,
                _ => SessionError::InvalidToken,
            })?;

        if token_data.claims.token_type != expected {
            return Err(SessionError::InvalidToken);
        }

        Ok(token_data.claims)
    }
}
