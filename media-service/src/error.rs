/// Error types for the media service
///
/// Every operation returns `Result<T>`; errors carry enough to build
/// the failure envelope handed back to the API layer.
use serde::Serialize;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed required field/identifier; reported before
    /// any store access is attempted
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced entity id does not resolve
    #[error("Not found: {0}")]
    NotFound(String),

    /// Viewer is not the owner of the target entity
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Uniqueness violation that escaped the toggle path's
    /// already-in-state reinterpretation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Asset store or other collaborator failed
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Failure envelope carried back to the API layer
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
    pub errors: Vec<String>,
}

impl AppError {
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Forbidden(_) => 403,
            AppError::Conflict(_) => 409,
            AppError::Upstream(_) => 502,
            AppError::Database(_) => 500,
        }
    }

    pub fn into_body(self) -> ErrorBody {
        ErrorBody {
            status_code: self.status_code(),
            message: self.to_string(),
            errors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_distinguish_missing_from_not_yours() {
        assert_eq!(AppError::NotFound("video".into()).status_code(), 404);
        assert_eq!(AppError::Forbidden("not owner".into()).status_code(), 403);
    }

    #[test]
    fn error_body_carries_status_and_message() {
        let body = AppError::Validation("name is required".into()).into_body();
        assert_eq!(body.status_code, 400);
        assert!(body.message.contains("name is required"));
    }
}
