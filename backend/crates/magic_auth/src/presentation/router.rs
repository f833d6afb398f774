//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::application::AuthService;
use crate::domain::repository::{AuthSessionRepository, AuthTokenRepository, UserIdentityRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth_session;

/// Create the Auth router for any repository implementation.
///
/// Mount under `/v1/auth`.
pub fn auth_router<R>(service: AuthService<R>) -> Router
where
    R: AuthTokenRepository + AuthSessionRepository + UserIdentityRepository + Send + Sync + 'static,
{
    let state = AuthAppState { service };

    let guarded = Router::new()
        .route("/session", get(handlers::session_status))
        .route_layer(from_fn_with_state(state.clone(), require_auth_session::<R>));

    Router::new()
        .route("/request-link", post(handlers::request_link::<R>))
        .route("/verify", post(handlers::verify::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .merge(guarded)
        .with_state(state)
}
