//! Domain Entities

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{CoachingSessionId, TranscriptHash};

/// Server-side lifecycle metadata for one coaching session.
///
/// The transcript itself never reaches the server, only its hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachingSession {
    pub session_id: CoachingSessionId,
    pub user_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub transcript_hash: Option<TranscriptHash>,
}

impl CoachingSession {
    /// Fresh record from a start call
    pub fn started(session_id: CoachingSessionId, user_id: String, at: DateTime<Utc>) -> Self {
        Self {
            session_id,
            user_id,
            started_at: at,
            ended_at: None,
            transcript_hash: None,
        }
    }

    /// Apply a start call to an existing record; end data is kept.
    pub fn restart(&mut self, user_id: String, at: DateTime<Utc>) {
        self.user_id = user_id;
        self.started_at = at;
    }

    /// Apply an end call. Without a prior start, `started_at` is the end time.
    pub fn end(
        existing: Option<Self>,
        session_id: CoachingSessionId,
        user_id: String,
        transcript_hash: TranscriptHash,
        at: DateTime<Utc>,
    ) -> Self {
        let started_at = existing.map(|s| s.started_at).unwrap_or(at);
        Self {
            session_id,
            user_id,
            started_at,
            ended_at: Some(at),
            transcript_hash: Some(transcript_hash),
        }
    }

    pub fn is_ended(&self) -> bool {
        self.ended_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_end_without_start_backfills_started_at() {
        let at = Utc::now();
        let session = CoachingSession::end(
            None,
            CoachingSessionId::from_db("s"),
            "u".into(),
            TranscriptHash::from_db("h"),
            at,
        );
        assert_eq!(session.started_at, at);
        assert_eq!(session.ended_at, Some(at));
        assert!(session.is_ended());
    }

    #[test]
    fn test_end_keeps_original_start() {
        let start = Utc::now();
        let existing = CoachingSession::started(CoachingSessionId::from_db("s"), "u".into(), start);
        let end = start + TimeDelta::minutes(30);
        let session = CoachingSession::end(
            Some(existing),
            CoachingSessionId::from_db("s"),
            "u".into(),
            TranscriptHash::from_db("h"),
            end,
        );
        assert_eq!(session.started_at, start);
        assert_eq!(session.ended_at, Some(end));
    }
}
