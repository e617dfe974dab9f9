//! Error types for the auth0 CLI

use std::time::Duration;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Management API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Run `auth0 init` to store a valid Management API token.")]
    Unauthorized,

    #[error("Access denied. The token is missing the scope required for this operation.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// CLI configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `auth0 init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Tenant domain not configured. Run `auth0 init` to set up.")]
    MissingDomain,

    #[error("Management API token not configured. Run `auth0 init` to set up.")]
    MissingToken,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Errors raised while reading import inputs or applying an import
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Unable to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid import config: {0}")]
    InvalidConfig(String),

    #[error("Invalid tenant YAML: {0}")]
    InvalidYaml(String),

    #[error("{}", .0.join("\n"))]
    Duplicates(Vec<String>),

    #[error("Unable to {op} {kind} '{key}': {source}")]
    Operation {
        op: &'static str,
        kind: &'static str,
        key: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Unable to list {kind}: {source}")]
    Load {
        kind: &'static str,
        #[source]
        source: Box<Error>,
    },
}
