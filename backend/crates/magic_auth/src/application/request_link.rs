//! Request Link Use Case
//!
//! Issues a one-time sign-in token and mails the magic link.

use std::sync::Arc;

use platform::clock::Clock;
use platform::crypto::random_token;
use platform::random::RandomSource;
use platform::rate_limit::RateLimiter;

use crate::application::config::AuthConfig;
use crate::domain::entity::AuthToken;
use crate::domain::mailer::MagicLinkMailer;
use crate::domain::repository::AuthTokenRepository;
use crate::domain::value_object::{Email, TokenHash};
use crate::error::{AuthError, AuthResult};

/// Raw token length in bytes before encoding
const TOKEN_BYTES: usize = 32;

/// Request link input
pub struct RequestLinkInput {
    pub email: String,
    pub client_ip: String,
}

/// Request link output
#[derive(Debug)]
pub struct RequestLinkOutput {
    /// Only populated in development
    pub magic_link: Option<String>,
}

/// Request link use case
pub struct RequestLinkUseCase<T>
where
    T: AuthTokenRepository + Send + Sync + 'static,
{
    token_repo: Arc<T>,
    limiter: Arc<dyn RateLimiter>,
    mailer: Arc<dyn MagicLinkMailer>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    config: Arc<AuthConfig>,
}

impl<T> RequestLinkUseCase<T>
where
    T: AuthTokenRepository + Send + Sync + 'static,
{
    pub fn new(
        token_repo: Arc<T>,
        limiter: Arc<dyn RateLimiter>,
        mailer: Arc<dyn MagicLinkMailer>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            token_repo,
            limiter,
            mailer,
            clock,
            random,
            config,
        }
    }

    pub async fn execute(&self, input: RequestLinkInput) -> AuthResult<RequestLinkOutput> {
        let email = Email::new(&input.email)?;
        let now = self.clock.now();

        // 1. Rate limits (first rejection stops counting)
        let checks = self.config.rate_limit.checks(&input.client_ip, email.as_str());
        if !self.limiter.allow_all(&checks, now) {
            return Err(AuthError::RateLimited);
        }

        // 2. Token
        let raw_token = random_token(self.random.as_ref(), TOKEN_BYTES)
            .map_err(|e| AuthError::TokenIssue(e.to_string()))?;
        let token_hash = TokenHash::derive(&self.config.token_secret, &raw_token);
        let token = AuthToken::issue(token_hash, email.clone(), now, self.config.token_ttl);

        self.token_repo
            .save(&token)
            .await
            .map_err(|e| AuthError::TokenIssue(e.to_string()))?;

        // 3. Delivery
        let link = self.config.magic_link(&raw_token);
        self.mailer.send(&email, &link).await?;

        tracing::info!(
            event = "auth_request",
            email = %email.redacted(),
            expires_at_ms = token.expires_at_ms(),
            "Magic link issued"
        );

        Ok(RequestLinkOutput {
            magic_link: self.config.exposes_magic_link().then_some(link),
        })
    }
}
