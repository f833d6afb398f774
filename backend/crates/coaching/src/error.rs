//! Coaching Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type CoachingResult<T> = Result<T, CoachingError>;

#[derive(Debug, Error)]
pub enum CoachingError {
    #[error("Session ID missing")]
    MissingSessionId,

    #[error("Transcript hash missing")]
    MissingTranscriptHash,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoachingError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CoachingError::MissingSessionId | CoachingError::MissingTranscriptHash => {
                ErrorKind::BadRequest
            }
            CoachingError::Database(_) | CoachingError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CoachingError::MissingSessionId => "missing_session_id",
            CoachingError::MissingTranscriptHash => "missing_transcript_hash",
            CoachingError::Database(_) | CoachingError::Internal(_) => "internal_error",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CoachingError::MissingSessionId => "Session ID is required.",
            CoachingError::MissingTranscriptHash => "Transcript hash is required.",
            CoachingError::Database(_) | CoachingError::Internal(_) => "Internal server error.",
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.message()).with_code(self.code())
    }

    fn log(&self) {
        match self {
            CoachingError::Database(e) => {
                tracing::error!(error = %e, "Coaching database error");
            }
            CoachingError::Internal(msg) => {
                tracing::error!(message = %msg, "Coaching internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Coaching request rejected");
            }
        }
    }
}

impl IntoResponse for CoachingError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
