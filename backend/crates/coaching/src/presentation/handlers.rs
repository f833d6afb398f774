//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use kernel::http::JsonBody;
use magic_auth::AuthenticatedUser;
use platform::clock::{Clock, SystemClock};

use crate::application::{EndSessionInput, EndSessionUseCase, StartSessionInput, StartSessionUseCase};
use crate::domain::repository::CoachingSessionRepository;
use crate::error::CoachingResult;
use crate::presentation::dto::{EndSessionRequest, StartSessionRequest, StatusResponse};

/// Shared state for coaching handlers
pub struct CoachingAppState<R> {
    pub repo: Arc<R>,
    pub clock: Arc<dyn Clock>,
}

impl<R> CoachingAppState<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl<R> Clone for CoachingAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            clock: self.clock.clone(),
        }
    }
}

/// POST /v1/sessions/start
pub async fn start_session<R>(
    State(state): State<CoachingAppState<R>>,
    user: AuthenticatedUser,
    JsonBody(req): JsonBody<StartSessionRequest>,
) -> CoachingResult<Json<StatusResponse>>
where
    R: CoachingSessionRepository + Send + Sync + 'static,
{
    StartSessionUseCase::new(state.repo.clone(), state.clock.clone())
        .execute(StartSessionInput {
            session_id: req.session_id,
            user_id: user.user_id.to_string(),
        })
        .await?;

    Ok(Json(StatusResponse::ok()))
}

/// POST /v1/sessions/end
pub async fn end_session<R>(
    State(state): State<CoachingAppState<R>>,
    user: AuthenticatedUser,
    JsonBody(req): JsonBody<EndSessionRequest>,
) -> CoachingResult<Json<StatusResponse>>
where
    R: CoachingSessionRepository + Send + Sync + 'static,
{
    EndSessionUseCase::new(state.repo.clone(), state.clock.clone())
        .execute(EndSessionInput {
            session_id: req.session_id,
            transcript_hash: req.transcript_hash,
            user_id: user.user_id.to_string(),
        })
        .await?;

    Ok(Json(StatusResponse::ok()))
}
