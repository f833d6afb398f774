//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer (in-memory and SQLite) and must behave identically.

use chrono::{DateTime, Utc};

use crate::domain::entity::{AuthSession, AuthToken};
use crate::domain::value_object::{Email, SessionId, TokenHash, UserId};
use crate::error::AuthResult;

/// Magic-link token repository trait
#[trait_variant::make(AuthTokenRepository: Send)]
pub trait LocalAuthTokenRepository {
    /// Store a token, replacing any record under the same hash
    async fn save(&self, token: &AuthToken) -> AuthResult<()>;

    /// Atomically mark the token used and return its email.
    ///
    /// Returns `None` when the hash is unknown, already used, or
    /// `now >= expires_at`. Under concurrent calls for one hash at most one
    /// caller ever gets `Some`.
    async fn consume(&self, token_hash: &TokenHash, now: DateTime<Utc>)
    -> AuthResult<Option<Email>>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Create (or replace) a session
    async fn save(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find a session that is still valid at `now`
    async fn validate(
        &self,
        session_id: &SessionId,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<AuthSession>>;

    /// Delete a session; deleting an unknown id is not an error
    async fn delete(&self, session_id: &SessionId) -> AuthResult<()>;
}

/// User identity repository trait
#[trait_variant::make(UserIdentityRepository: Send)]
pub trait LocalUserIdentityRepository {
    /// Return the id bound to `email`, binding `candidate` if there is none.
    ///
    /// Racing callers with different candidates all receive the single
    /// winning id. `None` means the id could not be resolved.
    async fn get_or_create_by_email(
        &self,
        email: &Email,
        candidate: UserId,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<UserId>>;
}
