//! Session Guard
//!
//! Middleware for requiring a live session on protected routes. The
//! resolved identity is handed to handlers through [`AuthenticatedUser`].

use axum::Router;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;

use platform::cookie::extract_cookie;

use crate::application::AuthService;
use crate::domain::repository::{AuthSessionRepository, AuthTokenRepository, UserIdentityRepository};
use crate::domain::value_object::{Email, UserId};
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Identity of the caller, set by [`require_auth_session`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: Email,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when the route sits behind the guard
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::Unauthorized)
    }
}

/// Middleware that requires a valid session cookie
pub async fn require_auth_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AuthTokenRepository + AuthSessionRepository + UserIdentityRepository + Send + Sync + 'static,
{
    let cookie_value = extract_cookie(req.headers(), &state.service.config().session_cookie_name);

    let session = state.service.check_session(cookie_value.as_deref()).await?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: session.user_id,
        email: session.email,
    });

    Ok(next.run(req).await)
}

/// Put every route of `router` behind the session guard.
///
/// Routes added after this call are not guarded.
pub fn with_session_guard<R, S>(router: Router<S>, service: AuthService<R>) -> Router<S>
where
    R: AuthTokenRepository + AuthSessionRepository + UserIdentityRepository + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(from_fn_with_state(
        AuthAppState { service },
        require_auth_session::<R>,
    ))
}
