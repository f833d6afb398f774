//! In-Memory Repository Implementations
//!
//! Ephemeral backend: one mutex per store, every named operation runs
//! inside a single critical section. State is lost on restart.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entity::{AuthSession, AuthToken, UserIdentity};
use crate::domain::repository::{AuthSessionRepository, AuthTokenRepository, UserIdentityRepository};
use crate::domain::value_object::{Email, SessionId, TokenHash, UserId};
use crate::error::{AuthError, AuthResult};

/// In-memory auth repository
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    tokens: Arc<Mutex<HashMap<String, AuthToken>>>,
    sessions: Arc<Mutex<HashMap<String, AuthSession>>>,
    users: Arc<Mutex<HashMap<String, UserIdentity>>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<'a, T>(mutex: &'a Mutex<T>, store: &str) -> AuthResult<MutexGuard<'a, T>> {
    mutex
        .lock()
        .map_err(|_| AuthError::Internal(format!("{store} store lock poisoned")))
}

// ============================================================================
// Auth Token Repository Implementation
// ============================================================================

impl AuthTokenRepository for MemoryAuthRepository {
    async fn save(&self, token: &AuthToken) -> AuthResult<()> {
        let mut tokens = lock(&self.tokens, "token")?;
        tokens.insert(token.token_hash.as_str().to_string(), token.clone());
        Ok(())
    }

    async fn consume(&self, token_hash: &TokenHash, now: DateTime<Utc>) -> AuthResult<Option<Email>> {
        let mut tokens = lock(&self.tokens, "token")?;
        match tokens.get_mut(token_hash.as_str()) {
            Some(token) if token.is_consumable(now) => {
                token.used = true;
                Ok(Some(token.email.clone()))
            }
            _ => Ok(None),
        }
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for MemoryAuthRepository {
    async fn save(&self, session: &AuthSession) -> AuthResult<()> {
        let mut sessions = lock(&self.sessions, "session")?;
        sessions.insert(session.session_id.as_str().to_string(), session.clone());
        Ok(())
    }

    async fn validate(
        &self,
        session_id: &SessionId,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<AuthSession>> {
        let sessions = lock(&self.sessions, "session")?;
        Ok(sessions
            .get(session_id.as_str())
            .filter(|s| !s.is_expired(now))
            .cloned())
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        let mut sessions = lock(&self.sessions, "session")?;
        sessions.remove(session_id.as_str());
        Ok(())
    }
}

// ============================================================================
// User Identity Repository Implementation
// ============================================================================

impl UserIdentityRepository for MemoryAuthRepository {
    async fn get_or_create_by_email(
        &self,
        email: &Email,
        candidate: UserId,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<UserId>> {
        let mut users = lock(&self.users, "user")?;
        let identity = users
            .entry(email.as_str().to_string())
            .or_insert_with(|| UserIdentity {
                user_id: candidate,
                email: email.clone(),
                created_at: now,
            });
        Ok(Some(identity.user_id.clone()))
    }
}
