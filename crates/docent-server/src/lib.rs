//! Docent Server
//!
//! HTTP API for the document portal: accounts and JWT sessions, document
//! upload with text extraction, and grounded question answering.

#![warn(missing_docs)]

pub mod auth;
pub mod config;
pub mod handlers;
pub mod session;

use config::ServerConfig;
use docent_answerer::Answerer;
use docent_extractor::DefaultExtractor;
use docent_llm::{GeminiConfig, GeminiProvider};
use docent_store::{FileStore, SqliteStore, StoreError};
use handlers::{create_router, AppState, DynProvider};
use session::SessionManager;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Database could not be opened
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the answerer from configuration; no API key means not configured
pub fn build_answerer(config: &ServerConfig) -> Answerer<DynProvider> {
    match config.llm.resolve_api_key() {
        Some(api_key) => {
            let gemini = GeminiConfig::new(api_key)
                .with_model(config.llm.model.clone())
                .with_timeout_secs(config.llm.timeout_secs);
            let provider: Arc<DynProvider> = Arc::new(GeminiProvider::new(gemini));
            info!("Answer model: {}", config.llm.model);
            Answerer::new(Some(provider))
        }
        None => {
            warn!("No Gemini API key configured; questions will get a not-configured answer");
            Answerer::unconfigured()
        }
    }
}

/// Assemble application state from configuration
///
/// Opens the database and prepares the media root.
pub fn build_state(config: ServerConfig) -> Result<AppState, ServerError> {
    std::fs::create_dir_all(&config.media_root)?;
    let store = SqliteStore::new(&config.database_path)?;

    let sessions = SessionManager::new(
        &config.jwt_secret,
        config.token_expiry_secs,
        config.refresh_token_expiry_secs,
    );

    Ok(AppState {
        store: Arc::new(Mutex::new(store)),
        files: Arc::new(FileStore::new(config.media_root.clone())),
        extractor: Arc::new(DefaultExtractor::from_config(config.extractor.clone())),
        answerer: Arc::new(build_answerer(&config)),
        sessions: Arc::new(sessions),
        config: Arc::new(config),
    })
}

/// Start the HTTP server
///
/// Installs logging, opens storage and serves until the process exits.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Docent server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);
    info!("Media root: {:?}", config.media_root);
    info!("Token expiry: {} seconds", config.token_expiry_secs);

    let bind_addr = config.bind_addr();
    let state = build_state(config)?;
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Docent listening on {}", bind_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
