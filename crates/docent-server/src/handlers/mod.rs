//! HTTP request handlers for the Docent API.
//!
//! Routes are grouped by concern: accounts and tokens, documents, questions.

pub mod account;
pub mod ask;
pub mod documents;

use crate::config::ServerConfig;
use crate::session::{SessionError, SessionManager};
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use docent_answerer::Answerer;
use docent_domain::traits::{LlmProvider, TextExtractor};
use docent_llm::LlmError;
use docent_store::{FileStore, SqliteStore, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::error;

/// The model type the server works with
pub type DynProvider = dyn LlmProvider<Error = LlmError> + Send + Sync;

/// Extra multipart framing allowed on top of the upload limit, so an
/// oversized file still reaches the handler and gets a readable error
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Users, documents and revoked tokens
    pub store: Arc<Mutex<SqliteStore>>,
    /// Uploaded bytes
    pub files: Arc<FileStore>,
    /// Runs once per upload
    pub extractor: Arc<dyn TextExtractor + Send + Sync>,
    /// Grounded question answering
    pub answerer: Arc<Answerer<DynProvider>>,
    /// Session manager for JWT token operations
    pub sessions: Arc<SessionManager>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Lock the store for a short synchronous section
    pub fn store(&self) -> Result<MutexGuard<'_, SqliteStore>, AppError> {
        self.store
            .lock()
            .map_err(|_| AppError::Internal("Store lock poisoned".to_string()))
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Request failed validation
    BadRequest(String),
    /// Missing or unusable credentials
    Unauthorized(String),
    /// Resource absent or owned by someone else
    NotFound(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::TokenExpired | SessionError::InvalidToken => {
                AppError::Unauthorized("Given token not valid for any token type".to_string())
            }
            SessionError::JwtEncode(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal(e.to_string())
    }
}

/// GET /api/ - Welcome message and endpoint map
async fn api_root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Docent API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "register": "/api/register/",
            "login": "/api/login/",
            "logout": "/api/logout/",
            "token_refresh": "/api/token/refresh/",
            "profile": "/api/profile/",
            "documents": "/api/documents/",
            "ask_question": "/api/ask/",
        }
    }))
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    let body_limit = state.config.max_upload_bytes + BODY_LIMIT_SLACK;

    AxumRouter::new()
        .route("/health", get(health_check))
        .route("/api/", get(api_root))
        .route("/api/register/", post(account::register))
        .route("/api/login/", post(account::login))
        .route("/api/logout/", post(account::logout))
        .route("/api/token/refresh/", post(account::refresh_token))
        .route("/api/profile/", get(account::profile))
        .route(
            "/api/documents/",
            get(documents::list_documents).post(documents::upload_document),
        )
        .route(
            "/api/documents/:id/",
            get(documents::get_document)
                .patch(documents::rename_document)
                .delete(documents::delete_document),
        )
        .route("/api/ask/", post(ask::ask_question))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
