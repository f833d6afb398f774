//! Verify Token Use Case
//!
//! Consumes a magic-link token and establishes a session.

use std::sync::Arc;

use platform::clock::Clock;
use platform::random::RandomSource;

use crate::application::config::AuthConfig;
use crate::domain::entity::AuthSession;
use crate::domain::repository::{AuthSessionRepository, AuthTokenRepository, UserIdentityRepository};
use crate::domain::value_object::{SessionId, TokenHash, UserId};
use crate::error::{AuthError, AuthResult};

/// Verify token use case
pub struct VerifyTokenUseCase<T, S, U>
where
    T: AuthTokenRepository + Send + Sync + 'static,
    S: AuthSessionRepository + Send + Sync + 'static,
    U: UserIdentityRepository + Send + Sync + 'static,
{
    token_repo: Arc<T>,
    session_repo: Arc<S>,
    user_repo: Arc<U>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    config: Arc<AuthConfig>,
}

impl<T, S, U> VerifyTokenUseCase<T, S, U>
where
    T: AuthTokenRepository + Send + Sync + 'static,
    S: AuthSessionRepository + Send + Sync + 'static,
    U: UserIdentityRepository + Send + Sync + 'static,
{
    pub fn new(
        token_repo: Arc<T>,
        session_repo: Arc<S>,
        user_repo: Arc<U>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            token_repo,
            session_repo,
            user_repo,
            clock,
            random,
            config,
        }
    }

    /// Returns the new session; the caller turns it into a cookie.
    pub async fn execute(&self, raw_token: &str) -> AuthResult<AuthSession> {
        let raw_token = raw_token.trim();
        if raw_token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let now = self.clock.now();
        let token_hash = TokenHash::derive(&self.config.token_secret, raw_token);

        // 1. Single-use consume (unknown, used, expired and store errors look the same)
        let email = match self.token_repo.consume(&token_hash, now).await {
            Ok(Some(email)) => email,
            Ok(None) => return Err(AuthError::InvalidToken),
            Err(e) => {
                tracing::error!(error = %e, "Token consume failed");
                return Err(AuthError::InvalidToken);
            }
        };

        // 2. Stable identity
        let candidate = UserId::generate(self.random.as_ref())
            .map_err(|e| AuthError::SessionCreation(e.to_string()))?;
        let user_id = self
            .user_repo
            .get_or_create_by_email(&email, candidate, now)
            .await
            .map_err(|e| AuthError::SessionCreation(e.to_string()))?
            .ok_or_else(|| {
                tracing::warn!(email = %email.redacted(), "User identity could not be resolved");
                AuthError::SessionCreation("empty user id".to_string())
            })?;

        // 3. Session
        let session_id = SessionId::generate(self.random.as_ref())
            .map_err(|e| AuthError::SessionCreation(e.to_string()))?;
        let session = AuthSession::new(session_id, user_id, email, now, self.config.session_ttl);

        self.session_repo
            .save(&session)
            .await
            .map_err(|e| AuthError::SessionCreation(e.to_string()))?;

        tracing::info!(
            event = "auth_verify",
            user_id = %session.user_id,
            expires_at_ms = session.expires_at_ms(),
            "Session established"
        );

        Ok(session)
    }
}
