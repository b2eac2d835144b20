//! Error types for the pf-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates' errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Integration error: {0}")]
    Ode(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to write {path}")]
    Export {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<pf_ode::OdeError> for AppError {
    fn from(err: pf_ode::OdeError) -> Self {
        AppError::Ode(err.to_string())
    }
}

impl From<pf_network::NetworkError> for AppError {
    fn from(err: pf_network::NetworkError) -> Self {
        AppError::Network(err.to_string())
    }
}
