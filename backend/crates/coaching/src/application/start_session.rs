//! Start Session Use Case

use std::sync::Arc;

use platform::clock::Clock;

use crate::domain::repository::CoachingSessionRepository;
use crate::domain::value_objects::CoachingSessionId;
use crate::error::CoachingResult;

#[derive(Debug, Clone)]
pub struct StartSessionInput {
    pub session_id: String,
    /// From the session guard, never from the body
    pub user_id: String,
}

pub struct StartSessionUseCase<R>
where
    R: CoachingSessionRepository,
{
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> StartSessionUseCase<R>
where
    R: CoachingSessionRepository,
{
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn execute(&self, input: StartSessionInput) -> CoachingResult<()> {
        let session_id = CoachingSessionId::new(&input.session_id)?;

        self.repo
            .start(&session_id, &input.user_id, self.clock.now())
            .await?;

        tracing::info!(
            event = "session_start",
            session_id = %session_id,
            user_id = %input.user_id,
            "Coaching session started"
        );

        Ok(())
    }
}
