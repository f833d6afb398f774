//! Check Session Use Case
//!
//! Resolves a session cookie value to a live session.

use std::sync::Arc;

use platform::clock::Clock;

use crate::domain::entity::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::domain::value_object::SessionId;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            session_repo,
            clock,
        }
    }

    /// Fails closed: a store error is reported as `Unauthorized`.
    pub async fn execute(&self, cookie_value: Option<&str>) -> AuthResult<AuthSession> {
        let session_id = cookie_value
            .and_then(SessionId::from_cookie)
            .ok_or(AuthError::Unauthorized)?;

        match self
            .session_repo
            .validate(&session_id, self.clock.now())
            .await
        {
            Ok(Some(session)) => Ok(session),
            Ok(None) => Err(AuthError::Unauthorized),
            Err(e) => {
                tracing::error!(error = %e, "Session lookup failed");
                Err(AuthError::Unauthorized)
            }
        }
    }
}
