//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].
//! Messages produced here are safe to show to clients; the original error is
//! kept only as `source` for logging.

use super::app_error::AppError;

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_request("Invalid JSON payload.")
                .with_code("invalid_json")
                .with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind as DbErrorKind;

        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::service_unavailable("Database connection unavailable").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                let app_err = match db_err.kind() {
                    DbErrorKind::UniqueViolation => AppError::conflict("Duplicate key value"),
                    DbErrorKind::ForeignKeyViolation => AppError::conflict("Foreign key violation"),
                    DbErrorKind::NotNullViolation => AppError::bad_request("Required field is null"),
                    DbErrorKind::CheckViolation => {
                        AppError::bad_request("Check constraint violation")
                    }
                    _ => AppError::internal("Database error"),
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database connection error").with_source(err)
            }
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = crate::http::ErrorBody {
            code: self.code().to_string(),
            message: self.message().to_string(),
        };

        // request_id is filled in by `attach_request_id` once the response
        // travels back through the middleware stack.
        let mut response = (status, body.render(None)).into_response();
        response.extensions_mut().insert(body);
        response
    }
}
