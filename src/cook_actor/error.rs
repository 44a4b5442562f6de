use thiserror::Error;

/// Errors that can occur during cook operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CookError {
    #[error("Cook validation error: {0}")]
    ValidationError(String),
}
