use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Entry not found in the session
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Shortcode already taken within the session
    #[error("Conflict error: {0}")]
    Conflict(String),

    /// Invalid input data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Session state unusable (e.g. poisoned lock)
    #[error("Session error: {0}")]
    Internal(String),
}
