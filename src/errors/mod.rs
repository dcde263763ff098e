use std::io::Error as IoError;

use thiserror::Error;

pub mod config;
pub mod session;

pub use config::ConfigError;
pub use session::SessionError;

#[derive(Debug, Error)]
pub enum AppError {
    // Service-level domain errors
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Conflict error: {0}")]
    Conflict(String),
    #[error("Not found error: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
    // Infrastructure/system errors
    #[error("Terminal error: {0}")]
    Io(#[from] IoError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Logger error: {0}")]
    Logger(String),
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(msg) => AppError::NotFound(msg),
            SessionError::Conflict(msg) => AppError::Conflict(msg),
            SessionError::InvalidData(msg) => AppError::Validation(msg),
            SessionError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Flatten field errors into a single string
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let reasons = errs
                    .iter()
                    .map(|e| e.message.clone().unwrap_or_else(|| "invalid".into()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}: {}", field, reasons)
            })
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Validation(message)
    }
}
