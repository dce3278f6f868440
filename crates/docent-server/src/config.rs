//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files including bind address, JWT secret,
//! storage locations, the model key and extraction settings.

use docent_extractor::ExtractorConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable consulted when the config carries no API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Field present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// JWT secret for signing tokens
    pub jwt_secret: String,

    /// Access token expiry in seconds (default: 3600 = 1 hour)
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,

    /// Refresh token expiry in seconds (default: 86400 = 1 day)
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry_secs: u64,

    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Directory uploaded files are written under
    #[serde(default = "default_media_root")]
    pub media_root: PathBuf,

    /// Largest accepted upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Model settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Text extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

/// Model configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Gemini API key; absent means the answer service is not configured
    pub gemini_api_key: Option<String>,

    /// Model name
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: docent_llm::gemini::DEFAULT_MODEL.to_string(),
            timeout_secs: docent_llm::gemini::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl LlmConfig {
    /// The API key from the config file, else from `GEMINI_API_KEY`
    ///
    /// Blank values count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.gemini_api_key
            .clone()
            .or_else(|| std::env::var(GEMINI_API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8000
}

/// Default token expiry: 1 hour
fn default_token_expiry() -> u64 {
    3600
}

/// Default refresh token expiry: 1 day
fn default_refresh_token_expiry() -> u64 {
    86_400
}

fn default_database_path() -> String {
    "docent.db".to_string()
}

fn default_media_root() -> PathBuf {
    PathBuf::from("media")
}

/// Default upload limit: 10 MB
fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;

        // Validate required fields
        if config.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingField("jwt_secret".to_string()));
        }
        config.extractor.validate().map_err(ConfigError::Invalid)?;

        Ok(config)
    }

    /// Create a default configuration for local development
    pub fn default_dev_config() -> Self {
        ServerConfig {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            jwt_secret: "dev-secret-key-do-not-use-in-production".to_string(),
            token_expiry_secs: default_token_expiry(),
            refresh_token_expiry_secs: default_refresh_token_expiry(),
            database_path: default_database_path(),
            media_root: default_media_root(),
            max_upload_bytes: default_max_upload_bytes(),
            llm: LlmConfig::default(),
            extractor: ExtractorConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
