//! End Session Use Case

use std::sync::Arc;

use platform::clock::Clock;

use crate::domain::repository::CoachingSessionRepository;
use crate::domain::value_objects::{CoachingSessionId, TranscriptHash};
use crate::error::CoachingResult;

#[derive(Debug, Clone)]
pub struct EndSessionInput {
    pub session_id: String,
    pub transcript_hash: String,
    /// From the session guard, never from the body
    pub user_id: String,
}

pub struct EndSessionUseCase<R>
where
    R: CoachingSessionRepository,
{
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> EndSessionUseCase<R>
where
    R: CoachingSessionRepository,
{
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn execute(&self, input: EndSessionInput) -> CoachingResult<()> {
        // Session id is checked first so a body missing both reports it
        let session_id = CoachingSessionId::new(&input.session_id)?;
        let transcript_hash = TranscriptHash::new(&input.transcript_hash)?;

        self.repo
            .end(&session_id, &input.user_id, &transcript_hash, self.clock.now())
            .await?;

        tracing::info!(
            event = "session_end",
            session_id = %session_id,
            user_id = %input.user_id,
            "Coaching session ended"
        );

        Ok(())
    }
}
