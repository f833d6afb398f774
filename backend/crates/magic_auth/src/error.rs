//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! `Display` carries diagnostic detail for logs; clients only ever see
//! [`AuthError::code`] and [`AuthError::message`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::mailer::MailerError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email missing or not shaped like an address
    #[error("Invalid email address")]
    InvalidEmail,

    /// One of the request-link rate limits tripped
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Token could not be generated or stored
    #[error("Token issue failed: {0}")]
    TokenIssue(String),

    /// Magic link delivery failed
    #[error("Magic link delivery failed: {0}")]
    EmailDelivery(#[from] MailerError),

    /// Verify called without a token
    #[error("Token missing")]
    MissingToken,

    /// Token unknown, expired or already used
    #[error("Token invalid or expired")]
    InvalidToken,

    /// Identity or session could not be established
    #[error("Session creation failed: {0}")]
    SessionCreation(String),

    /// No valid session cookie
    #[error("Authentication required")]
    Unauthorized,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidEmail | AuthError::MissingToken => ErrorKind::BadRequest,
            AuthError::RateLimited => ErrorKind::TooManyRequests,
            AuthError::InvalidToken | AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::TokenIssue(_)
            | AuthError::EmailDelivery(_)
            | AuthError::SessionCreation(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Machine-readable code for the error envelope
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidEmail => "invalid_email",
            AuthError::RateLimited => "rate_limited",
            AuthError::TokenIssue(_) => "token_error",
            AuthError::EmailDelivery(_) => "email_error",
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidToken => "invalid_token",
            AuthError::SessionCreation(_) => "session_error",
            AuthError::Unauthorized => "unauthorized",
            AuthError::Database(_) | AuthError::Internal(_) => "internal_error",
        }
    }

    /// Client-facing message
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::InvalidEmail => "Email is required.",
            AuthError::RateLimited => "Too many requests.",
            AuthError::TokenIssue(_) => "Unable to issue token.",
            AuthError::EmailDelivery(_) => "Unable to deliver magic link.",
            AuthError::MissingToken => "Token is required.",
            AuthError::InvalidToken => "Token is invalid or expired.",
            AuthError::SessionCreation(_) => "Unable to create session.",
            AuthError::Unauthorized => "Authentication required.",
            AuthError::Database(_) | AuthError::Internal(_) => "Internal server error.",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.message()).with_code(self.code())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::TokenIssue(_) | AuthError::SessionCreation(_) => {
                tracing::error!(error = %self, "Auth flow failed");
            }
            AuthError::EmailDelivery(e) => {
                tracing::error!(error = %e, "Magic link delivery failed");
            }
            AuthError::RateLimited => {
                tracing::warn!("Magic link request rate limited");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_statuses() {
        let cases = [
            (AuthError::InvalidEmail, 400, "invalid_email"),
            (AuthError::RateLimited, 429, "rate_limited"),
            (AuthError::TokenIssue("x".into()), 500, "token_error"),
            (AuthError::MissingToken, 400, "missing_token"),
            (AuthError::InvalidToken, 401, "invalid_token"),
            (AuthError::SessionCreation("x".into()), 500, "session_error"),
            (AuthError::Unauthorized, 401, "unauthorized"),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_code().as_u16(), status, "{code}");
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn test_app_error_hides_detail() {
        let err = AuthError::TokenIssue("sqlite disk I/O error".into());
        let app = err.to_app_error();
        assert_eq!(app.code(), "token_error");
        assert_eq!(app.message(), "Unable to issue token.");
        assert!(!app.message().contains("sqlite"));
    }

    #[test]
    fn test_mailer_error_maps_to_email_error() {
        let err: AuthError = MailerError::Transport("connection refused".into()).into();
        assert_eq!(err.code(), "email_error");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
