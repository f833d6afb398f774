//! SQLite Repository Implementations
//!
//! Persistent backend. Timestamps are stored as Unix milliseconds.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::entity::{AuthSession, AuthToken};
use crate::domain::repository::{AuthSessionRepository, AuthTokenRepository, UserIdentityRepository};
use crate::domain::value_object::{Email, SessionId, TokenHash, UserId};
use crate::error::AuthResult;

/// Schema owned by this crate
const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS auth_tokens (
        token_hash TEXT PRIMARY KEY,
        email      TEXT NOT NULL,
        expires_at INTEGER NOT NULL,
        used       INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS auth_sessions (
        session_id TEXT PRIMARY KEY,
        user_id    TEXT NOT NULL,
        email      TEXT NOT NULL,
        expires_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id    TEXT PRIMARY KEY,
        email      TEXT NOT NULL UNIQUE,
        created_at INTEGER NOT NULL
    )
    "#,
];

/// SQLite-backed auth repository
#[derive(Clone)]
pub struct SqliteAuthRepository {
    pool: SqlitePool,
}

impl SqliteAuthRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create tables if missing. Safe to run on every startup.
    pub async fn migrate(&self) -> AuthResult<()> {
        for statement in MIGRATIONS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::info!("Auth schema ready");
        Ok(())
    }
}

// ============================================================================
// Auth Token Repository Implementation
// ============================================================================

impl AuthTokenRepository for SqliteAuthRepository {
    async fn save(&self, token: &AuthToken) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_tokens (token_hash, email, expires_at, used)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (token_hash) DO UPDATE SET
                email = excluded.email,
                expires_at = excluded.expires_at,
                used = excluded.used
            "#,
        )
        .bind(token.token_hash.as_str())
        .bind(token.email.as_str())
        .bind(token.expires_at_ms())
        .bind(token.used)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn consume(&self, token_hash: &TokenHash, now: DateTime<Utc>) -> AuthResult<Option<Email>> {
        // Single conditional write: at most one caller sees the row change
        let email: Option<String> = sqlx::query_scalar(
            r#"
            UPDATE auth_tokens
            SET used = 1
            WHERE token_hash = ? AND used = 0 AND expires_at > ?
            RETURNING email
            "#,
        )
        .bind(token_hash.as_str())
        .bind(now.timestamp_millis())
        .fetch_optional(&self.pool)
        .await?;

        Ok(email.map(Email::from_db))
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for SqliteAuthRepository {
    async fn save(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (session_id, user_id, email, expires_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (session_id) DO UPDATE SET
                user_id = excluded.user_id,
                email = excluded.email,
                expires_at = excluded.expires_at
            "#,
        )
        .bind(session.session_id.as_str())
        .bind(session.user_id.as_str())
        .bind(session.email.as_str())
        .bind(session.expires_at_ms())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn validate(
        &self,
        session_id: &SessionId,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT session_id, user_id, email, expires_at
            FROM auth_sessions
            WHERE session_id = ? AND expires_at > ?
            "#,
        )
        .bind(session_id.as_str())
        .bind(now.timestamp_millis())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(SessionRow::into_session))
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = ?")
            .bind(session_id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// User Identity Repository Implementation
// ============================================================================

impl UserIdentityRepository for SqliteAuthRepository {
    async fn get_or_create_by_email(
        &self,
        email: &Email,
        candidate: UserId,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<UserId>> {
        if let Some(existing) = self.find_user_id(email).await? {
            return Ok(Some(existing));
        }

        // Racing creators: the first insert wins, the rest are ignored
        sqlx::query(
            r#"
            INSERT INTO users (user_id, email, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(candidate.as_str())
        .bind(email.as_str())
        .bind(now.timestamp_millis())
        .execute(&self.pool)
        .await?;

        self.find_user_id(email).await
    }
}

impl SqliteAuthRepository {
    async fn find_user_id(&self, email: &Email) -> AuthResult<Option<UserId>> {
        let user_id: Option<String> =
            sqlx::query_scalar("SELECT user_id FROM users WHERE email = ?")
                .bind(email.as_str())
                .fetch_optional(&self.pool)
                .await?;

        Ok(user_id.and_then(UserId::new))
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: String,
    user_id: String,
    email: String,
    expires_at: i64,
}

impl SessionRow {
    /// `None` for rows that break invariants (empty user id, bad timestamp)
    fn into_session(self) -> Option<AuthSession> {
        Some(AuthSession {
            session_id: SessionId::from_db(self.session_id),
            user_id: UserId::new(self.user_id)?,
            email: Email::from_db(self.email),
            expires_at: DateTime::<Utc>::from_timestamp_millis(self.expires_at)?,
        })
    }
}
