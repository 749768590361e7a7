//! Blog Error Types
//!
//! This module provides blog-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::AppError, code::ErrorCode, conversions::is_unique_violation, kind::ErrorKind,
};
use platform::password::HashError;
use thiserror::Error;

use crate::domain::validation::ValidationError;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    /// Body is not valid JSON for the expected shape
    #[error("Malformed request body: {0}")]
    BadBody(String),

    /// Field rejected by a validator
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Authenticated but not an admin
    #[error("Insufficient permissions")]
    NoPermissions,

    /// Single-post read found nothing
    #[error("Post not found")]
    PostNotFound,

    /// Write referenced a post that does not exist
    #[error("No such post")]
    NoSuchPost,

    /// Write referenced a comment that does not exist
    #[error("No such comment")]
    NoSuchComment,

    /// Write referenced a row that does not exist (tag, parent comment)
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Tag already exists")]
    TagAlreadyExists,

    #[error("User already registered")]
    UserAlreadyRegistered,

    /// Unknown user or password mismatch
    #[error("Wrong credentials")]
    WrongCredentials,

    /// Bearer token missing, malformed, expired or badly signed
    #[error("Invalid token")]
    InvalidToken,

    /// Fingerprint cookie missing or not matching the token
    #[error("Invalid fingerprint")]
    InvalidFingerprint,

    /// Unique constraint violation not claimed by a use case
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Store unreachable
    #[error("Store unavailable: {0}")]
    Unavailable(sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Wire code placed in the envelope
    pub fn code(&self) -> ErrorCode {
        match self {
            BlogError::BadBody(_) => ErrorCode::BadBody,
            BlogError::Validation(e) => e.code(),
            BlogError::NoPermissions => ErrorCode::NoPermissions,
            BlogError::PostNotFound | BlogError::NoSuchPost => ErrorCode::NoSuchPost,
            BlogError::NoSuchComment => ErrorCode::NoSuchComment,
            BlogError::InvalidReference(_) => ErrorCode::InvalidRequest,
            BlogError::TagAlreadyExists => ErrorCode::TagAlreadyExists,
            BlogError::UserAlreadyRegistered => ErrorCode::UserAlreadyRegistered,
            BlogError::WrongCredentials => ErrorCode::WrongCredentials,
            BlogError::InvalidToken => ErrorCode::InvalidToken,
            BlogError::InvalidFingerprint => ErrorCode::InvalidFingerprint,
            BlogError::Duplicate(_)
            | BlogError::Database(_)
            | BlogError::Unavailable(_)
            | BlogError::Internal(_) => ErrorCode::TechnicalError,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::BadBody(_)
            | BlogError::Validation(_)
            | BlogError::NoSuchPost
            | BlogError::NoSuchComment
            | BlogError::InvalidReference(_)
            | BlogError::TagAlreadyExists
            | BlogError::UserAlreadyRegistered => ErrorKind::BadRequest,
            BlogError::WrongCredentials
            | BlogError::InvalidToken
            | BlogError::InvalidFingerprint => ErrorKind::Unauthorized,
            BlogError::NoPermissions => ErrorKind::Forbidden,
            BlogError::PostNotFound => ErrorKind::NotFound,
            BlogError::Unavailable(_) => ErrorKind::ServiceUnavailable,
            BlogError::Duplicate(_) | BlogError::Database(_) | BlogError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.code()).with_message(self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Unavailable(e) => {
                tracing::error!(error = %e, "Store unreachable");
            }
            BlogError::Duplicate(msg) => {
                tracing::error!(message = %msg, "Unexpected unique violation");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            BlogError::WrongCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            BlogError::InvalidFingerprint => {
                tracing::warn!("Fingerprint mismatch detected");
            }
            _ => {
                tracing::debug!(error = %self, code = %self.code(), "Blog request rejected");
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for BlogError {
    fn from(err: sqlx::Error) -> Self {
        if is_unique_violation(&err) {
            BlogError::Duplicate(err.to_string())
        } else {
            BlogError::Database(err)
        }
    }
}

impl From<HashError> for BlogError {
    fn from(err: HashError) -> Self {
        BlogError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for BlogError {
    fn from(rejection: JsonRejection) -> Self {
        BlogError::BadBody(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for BlogError {
    fn from(err: tokio::task::JoinError) -> Self {
        BlogError::Internal(format!("blocking task failed: {err}"))
    }
}
