//! Coaching Router

use axum::{Router, routing::post};

use magic_auth::AuthService;
use magic_auth::domain::repository::{
    AuthSessionRepository, AuthTokenRepository, UserIdentityRepository,
};
use magic_auth::with_session_guard;

use crate::domain::repository::CoachingSessionRepository;
use crate::presentation::handlers::{self, CoachingAppState};

/// Create the coaching router. Mount under `/v1/sessions`.
pub fn coaching_router<R, A>(state: CoachingAppState<R>, auth: AuthService<A>) -> Router
where
    R: CoachingSessionRepository + Send + Sync + 'static,
    A: AuthTokenRepository + AuthSessionRepository + UserIdentityRepository + Send + Sync + 'static,
{
    let routes = Router::new()
        .route("/start", post(handlers::start_session::<R>))
        .route("/end", post(handlers::end_session::<R>));

    with_session_guard(routes, auth).with_state(state)
}
