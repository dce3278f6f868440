//! Account, login and token endpoints

use super::{AppError, AppState};
use crate::auth::{hash_password, validate_password, verify_password, AuthUser};
use crate::session::{TokenPair, TokenType};
use axum::{extract::State, http::StatusCode, Json};
use docent_domain::traits::UserStore;
use docent_domain::{NewUser, User};
use docent_store::{now_secs, StoreError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID
    pub id: i64,
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.value(),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Returned by register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The account
    pub user: UserResponse,
    /// Refresh token
    pub refresh: String,
    /// Access token
    pub access: String,
}

impl AuthResponse {
    fn new(user: &User, tokens: TokenPair) -> Self {
        Self {
            user: UserResponse::from(user),
            refresh: tokens.refresh,
            access: tokens.access,
        }
    }
}

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    password_confirm: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    username: Option<String>,
    password: Option<String>,
}

/// Logout request
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    refresh: Option<String>,
}

/// Token refresh request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    refresh: String,
}

/// Token refresh response
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// New access token
    pub access: String,
}

/// Simple message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message text
    pub message: String,
}

async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))
}

/// POST /api/register/ - Create an account and log it in
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let username = request.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::BadRequest("Username is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }
    validate_password(&request.password).map_err(AppError::BadRequest)?;
    if request.password != request.password_confirm {
        return Err(AppError::BadRequest("Passwords don't match".to_string()));
    }

    if state.store()?.find_user_by_username(&username)?.is_some() {
        return Err(AppError::BadRequest(
            "A user with that username already exists.".to_string(),
        ));
    }

    let password = request.password;
    let password_hash = blocking(move || hash_password(&password)).await??;

    let user = state
        .store()?
        .create_user(NewUser {
            username,
            email: request.email.trim().to_string(),
            first_name: request.first_name,
            last_name: request.last_name,
            password_hash,
        })
        .map_err(|e| match e {
            StoreError::Duplicate(_) => {
                AppError::BadRequest("A user with that username already exists.".to_string())
            }
            other => other.into(),
        })?;

    info!("Registered user {} ({})", user.username, user.id);

    let tokens = state.sessions.issue_pair(user.id)?;
    Ok((StatusCode::CREATED, Json(AuthResponse::new(&user, tokens))))
}

/// POST /api/login/ - Exchange credentials for a token pair
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let (Some(username), Some(password)) = (request.username, request.password) else {
        return Err(invalid());
    };
    if username.is_empty() || password.is_empty() {
        return Err(invalid());
    }

    let Some(user) = state.store()?.find_user_by_username(&username)? else {
        warn!("Login attempt for unknown user '{}'", username);
        return Err(invalid());
    };

    let encoded = user.password_hash.clone();
    let verified = blocking(move || verify_password(&password, &encoded)).await?;
    if !verified {
        warn!("Failed login for user '{}'", username);
        return Err(invalid());
    }

    info!("User {} logged in", user.id);

    let tokens = state.sessions.issue_pair(user.id)?;
    Ok(Json(AuthResponse::new(&user, tokens)))
}

/// POST /api/logout/ - Revoke the given refresh token
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    request: Option<Json<LogoutRequest>>,
) -> Result<Json<MessageResponse>, AppError> {
    let refresh = request.and_then(|Json(r)| r.refresh);

    if let Some(refresh) = refresh {
        let claims = state
            .sessions
            .validate(&refresh, TokenType::Refresh)
            .map_err(|_| AppError::BadRequest("Token is invalid or expired".to_string()))?;

        if claims.user() != user_id {
            return Err(AppError::BadRequest("Token is invalid or expired".to_string()));
        }

        let mut store = state.store()?;
        store.revoke_token(&claims.jti, claims.exp)?;
        store.purge_expired_revocations(now_secs())?;
        info!("User {} logged out", user_id);
    }

    Ok(Json(MessageResponse {
        message: "Logout successful".to_string(),
    }))
}

/// POST /api/token/refresh/ - Mint a new access token
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AppError> {
    let claims = state.sessions.validate(&request.refresh, TokenType::Refresh)?;

    {
        let store = state.store()?;
        if store.is_token_revoked(&claims.jti)? {
            return Err(AppError::Unauthorized("Token is blacklisted".to_string()));
        }
        if store.get_user(claims.user())?.is_none() {
            return Err(AppError::Unauthorized("User not found".to_string()));
        }
    }

    let access = state.sessions.issue(claims.user(), TokenType::Access)?;
    Ok(Json(RefreshResponse { access }))
}

/// GET /api/profile/ - The caller's account
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .store()?
        .get_user(user_id)?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from(&user)))
}
