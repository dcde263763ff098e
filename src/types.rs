use crate::errors::AppError;

// Custom result type used across handler-facing code
pub type Result<T> = std::result::Result<T, AppError>;
