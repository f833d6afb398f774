//! Repository Traits

use chrono::{DateTime, Utc};

use crate::domain::entities::CoachingSession;
use crate::domain::value_objects::{CoachingSessionId, TranscriptHash};
use crate::error::CoachingResult;

/// Coaching session repository trait
#[trait_variant::make(CoachingSessionRepository: Send)]
pub trait LocalCoachingSessionRepository {
    /// Upsert user and start time; end data on an existing record is kept
    async fn start(
        &self,
        session_id: &CoachingSessionId,
        user_id: &str,
        started_at: DateTime<Utc>,
    ) -> CoachingResult<()>;

    /// Record user, transcript hash and end time, creating the record if needed
    async fn end(
        &self,
        session_id: &CoachingSessionId,
        user_id: &str,
        transcript_hash: &TranscriptHash,
        ended_at: DateTime<Utc>,
    ) -> CoachingResult<()>;

    /// Get a session by ID
    async fn find(&self, session_id: &CoachingSessionId) -> CoachingResult<Option<CoachingSession>>;
}
