use serde::Serialize;
use thiserror::Error;

/// Every engine failure is a rejected precondition, not a system fault:
/// the calling layer needs to know which rule refused the request so it
/// can present an accurate message.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Quiz not found: {0}")]
    QuizNotFound(String),

    #[error("Attempt not found: {0}")]
    AttemptNotFound(String),

    #[error("Attempt not allowed: {0}")]
    AttemptNotAllowed(String),

    #[error("No active attempt for user: {0}")]
    NoActiveAttempt(String),

    #[error("Invalid question index: {0}")]
    InvalidQuestionIndex(usize),

    #[error("Invalid option index: {0}")]
    InvalidOptionIndex(i32),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::QuizNotFound(_) => "QUIZ_NOT_FOUND",
            AppError::AttemptNotFound(_) => "ATTEMPT_NOT_FOUND",
            AppError::AttemptNotAllowed(_) => "ATTEMPT_NOT_ALLOWED",
            AppError::NoActiveAttempt(_) => "NO_ACTIVE_ATTEMPT",
            AppError::InvalidQuestionIndex(_) => "INVALID_QUESTION_INDEX",
            AppError::InvalidOptionIndex(_) => "INVALID_OPTION_INDEX",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        ErrorResponse {
            error: err.to_string(),
            code: err.error_code(),
        }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::DatabaseError(format!("BSON serialization error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
