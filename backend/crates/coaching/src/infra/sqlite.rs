//! SQLite Coaching Repository

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::entities::CoachingSession;
use crate::domain::repository::CoachingSessionRepository;
use crate::domain::value_objects::{CoachingSessionId, TranscriptHash};
use crate::error::CoachingResult;

const MIGRATION: &str = r#"
    CREATE TABLE IF NOT EXISTS coaching_sessions (
        session_id      TEXT PRIMARY KEY,
        user_id         TEXT NOT NULL,
        started_at      INTEGER NOT NULL,
        ended_at        INTEGER,
        transcript_hash TEXT
    )
"#;

#[derive(Clone)]
pub struct SqliteCoachingRepository {
    pool: SqlitePool,
}

impl SqliteCoachingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> CoachingResult<()> {
        sqlx::query(MIGRATION).execute(&self.pool).await?;
        tracing::info!("Coaching schema ready");
        Ok(())
    }
}

impl CoachingSessionRepository for SqliteCoachingRepository {
    async fn start(
        &self,
        session_id: &CoachingSessionId,
        user_id: &str,
        started_at: DateTime<Utc>,
    ) -> CoachingResult<()> {
        sqlx::query(
            r#"
            INSERT INTO coaching_sessions (session_id, user_id, started_at)
            VALUES (?, ?, ?)
            ON CONFLICT (session_id) DO UPDATE SET
                user_id = excluded.user_id,
                started_at = excluded.started_at
            "#,
        )
        .bind(session_id.as_str())
        .bind(user_id)
        .bind(started_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn end(
        &self,
        session_id: &CoachingSessionId,
        user_id: &str,
        transcript_hash: &TranscriptHash,
        ended_at: DateTime<Utc>,
    ) -> CoachingResult<()> {
        // started_at only takes the end time when the row is new
        sqlx::query(
            r#"
            INSERT INTO coaching_sessions (session_id, user_id, started_at, ended_at, transcript_hash)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (session_id) DO UPDATE SET
                user_id = excluded.user_id,
                ended_at = excluded.ended_at,
                transcript_hash = excluded.transcript_hash
            "#,
        )
        .bind(session_id.as_str())
        .bind(user_id)
        .bind(ended_at.timestamp_millis())
        .bind(ended_at.timestamp_millis())
        .bind(transcript_hash.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, session_id: &CoachingSessionId) -> CoachingResult<Option<CoachingSession>> {
        let row = sqlx::query_as::<_, CoachingSessionRow>(
            r#"
            SELECT session_id, user_id, started_at, ended_at, transcript_hash
            FROM coaching_sessions
            WHERE session_id = ?
            "#,
        )
        .bind(session_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(CoachingSessionRow::into_session))
    }
}

#[derive(sqlx::FromRow)]
struct CoachingSessionRow {
    session_id: String,
    user_id: String,
    started_at: i64,
    ended_at: Option<i64>,
    transcript_hash: Option<String>,
}

impl CoachingSessionRow {
    fn into_session(self) -> Option<CoachingSession> {
        let ended_at = match self.ended_at {
            Some(ms) => Some(DateTime::<Utc>::from_timestamp_millis(ms)?),
            None => None,
        };
        Some(CoachingSession {
            session_id: CoachingSessionId::from_db(self.session_id),
            user_id: self.user_id,
            started_at: DateTime::<Utc>::from_timestamp_millis(self.started_at)?,
            ended_at,
            transcript_hash: self.transcript_hash.map(TranscriptHash::from_db),
        })
    }
}
