//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::IntoResponse;

use kernel::http::JsonBody;
use platform::client::ClientIp;
use platform::cookie::{extract_cookie, to_header_value};

use crate::application::AuthService;
use crate::domain::repository::{AuthSessionRepository, AuthTokenRepository, UserIdentityRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    RequestLinkRequest, RequestLinkResponse, SessionStatusResponse, StatusResponse, VerifyRequest,
};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers and the session guard
pub struct AuthAppState<R> {
    pub service: AuthService<R>,
}

impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

// ============================================================================
// Health
// ============================================================================

/// GET /v1/health
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

// ============================================================================
// Request Link
// ============================================================================

/// POST /v1/auth/request-link
pub async fn request_link<R>(
    State(state): State<AuthAppState<R>>,
    ClientIp(client_ip): ClientIp,
    JsonBody(req): JsonBody<RequestLinkRequest>,
) -> AuthResult<Json<RequestLinkResponse>>
where
    R: AuthTokenRepository + AuthSessionRepository + UserIdentityRepository + Send + Sync + 'static,
{
    let output = state.service.request_link(&req.email, &client_ip).await?;

    Ok(Json(RequestLinkResponse {
        status: "ok",
        magic_link: output.magic_link,
    }))
}

// ============================================================================
// Verify
// ============================================================================

/// POST /v1/auth/verify
pub async fn verify<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<VerifyRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthTokenRepository + AuthSessionRepository + UserIdentityRepository + Send + Sync + 'static,
{
    let session = state.service.verify(&req.token).await?;

    let cookie = state
        .service
        .config()
        .cookie_config()
        .build_set_cookie(session.session_id.as_str(), session.expires_at);
    let cookie = to_header_value(&cookie)
        .ok_or_else(|| AuthError::SessionCreation("session cookie is not a valid header".into()))?;

    Ok(([(header::SET_COOKIE, cookie)], Json(StatusResponse::ok())))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /v1/auth/session (behind the session guard)
pub async fn session_status(user: AuthenticatedUser) -> Json<SessionStatusResponse> {
    Json(SessionStatusResponse {
        status: "ok",
        user_id: Some(user.user_id.to_string()),
        email: Some(user.email.to_string()),
    })
}

// ============================================================================
// Logout
// ============================================================================

/// POST /v1/auth/logout
///
/// Always succeeds and always clears the cookie.
pub async fn logout<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> impl IntoResponse
where
    R: AuthTokenRepository + AuthSessionRepository + UserIdentityRepository + Send + Sync + 'static,
{
    let config = state.service.config();
    let cookie_value = extract_cookie(&headers, &config.session_cookie_name);

    state.service.sign_out(cookie_value.as_deref()).await;

    let clear = config.cookie_config().build_delete_cookie();
    match to_header_value(&clear) {
        Some(value) => ([(header::SET_COOKIE, value)], Json(StatusResponse::ok())).into_response(),
        None => {
            tracing::warn!("Clear-cookie header could not be encoded");
            Json(StatusResponse::ok()).into_response()
        }
    }
}
