use thiserror::Error;

use crate::application::validators::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid or missing API key")]
    InvalidApiKey,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service temporarily unavailable")]
    ServiceUnavailable,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    ValidationError,
    InvalidInput,
    InvalidApiKey,
    InvalidCredentials,
    NotFound,
    Conflict,
    ServiceUnavailable,
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::InvalidApiKey => "INVALID_API_KEY",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::InvalidApiKey => ErrorCode::InvalidApiKey,
            AppError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AppError::NotFound => ErrorCode::NotFound,
            AppError::Conflict(_) => ErrorCode::Conflict,
            AppError::ServiceUnavailable => ErrorCode::ServiceUnavailable,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

pub type AppResult<T> = Result<T, AppError>;
