//! In-Memory Coaching Repository

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entities::CoachingSession;
use crate::domain::repository::CoachingSessionRepository;
use crate::domain::value_objects::{CoachingSessionId, TranscriptHash};
use crate::error::{CoachingError, CoachingResult};

#[derive(Clone, Default)]
pub struct MemoryCoachingRepository {
    sessions: Arc<Mutex<HashMap<String, CoachingSession>>>,
}

impl MemoryCoachingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CoachingResult<MutexGuard<'_, HashMap<String, CoachingSession>>> {
        self.sessions
            .lock()
            .map_err(|_| CoachingError::Internal("coaching store lock poisoned".into()))
    }
}

impl CoachingSessionRepository for MemoryCoachingRepository {
    async fn start(
        &self,
        session_id: &CoachingSessionId,
        user_id: &str,
        started_at: DateTime<Utc>,
    ) -> CoachingResult<()> {
        let mut sessions = self.lock()?;
        match sessions.get_mut(session_id.as_str()) {
            Some(existing) => existing.restart(user_id.to_string(), started_at),
            None => {
                sessions.insert(
                    session_id.as_str().to_string(),
                    CoachingSession::started(session_id.clone(), user_id.to_string(), started_at),
                );
            }
        }
        Ok(())
    }

    async fn end(
        &self,
        session_id: &CoachingSessionId,
        user_id: &str,
        transcript_hash: &TranscriptHash,
        ended_at: DateTime<Utc>,
    ) -> CoachingResult<()> {
        let mut sessions = self.lock()?;
        let existing = sessions.remove(session_id.as_str());
        let ended = CoachingSession::end(
            existing,
            session_id.clone(),
            user_id.to_string(),
            transcript_hash.clone(),
            ended_at,
        );
        sessions.insert(session_id.as_str().to_string(), ended);
        Ok(())
    }

    async fn find(&self, session_id: &CoachingSessionId) -> CoachingResult<Option<CoachingSession>> {
        Ok(self.lock()?.get(session_id.as_str()).cloned())
    }
}
