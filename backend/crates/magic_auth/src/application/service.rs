//! Auth Service
//!
//! Owns the repository and the runtime collaborators (clock, randomness,
//! rate limiter, mailer) and runs the use cases against them. Handlers and
//! the session guard only ever talk to this type.

use std::sync::Arc;

use platform::clock::{Clock, SystemClock};
use platform::random::{OsRandom, RandomSource};
use platform::rate_limit::{FixedWindowRateLimiter, RateLimiter};

use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::application::request_link::{RequestLinkInput, RequestLinkOutput, RequestLinkUseCase};
use crate::application::sign_out::SignOutUseCase;
use crate::application::verify_token::VerifyTokenUseCase;
use crate::domain::entity::AuthSession;
use crate::domain::mailer::MagicLinkMailer;
use crate::domain::repository::{AuthSessionRepository, AuthTokenRepository, UserIdentityRepository};
use crate::error::AuthResult;
use crate::infra::mailer::ConsoleMailer;

pub struct AuthService<R> {
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    limiter: Arc<dyn RateLimiter>,
    mailer: Arc<dyn MagicLinkMailer>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl<R> Clone for AuthService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            limiter: self.limiter.clone(),
            mailer: self.mailer.clone(),
            clock: self.clock.clone(),
            random: self.random.clone(),
        }
    }
}

impl<R> AuthService<R>
where
    R: AuthTokenRepository + AuthSessionRepository + UserIdentityRepository + Send + Sync + 'static,
{
    /// System clock, OS randomness, in-process rate limiter, console mailer.
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            limiter: Arc::new(FixedWindowRateLimiter::new()),
            mailer: Arc::new(ConsoleMailer),
            clock: Arc::new(SystemClock),
            random: Arc::new(OsRandom),
        }
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn MagicLinkMailer>) -> Self {
        self.mailer = mailer;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_rate_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    // ========================================================================
    // Flows
    // ========================================================================

    pub async fn request_link(&self, email: &str, client_ip: &str) -> AuthResult<RequestLinkOutput> {
        RequestLinkUseCase::new(
            self.repo.clone(),
            self.limiter.clone(),
            self.mailer.clone(),
            self.clock.clone(),
            self.random.clone(),
            self.config.clone(),
        )
        .execute(RequestLinkInput {
            email: email.to_string(),
            client_ip: client_ip.to_string(),
        })
        .await
    }

    pub async fn verify(&self, raw_token: &str) -> AuthResult<AuthSession> {
        VerifyTokenUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.clock.clone(),
            self.random.clone(),
            self.config.clone(),
        )
        .execute(raw_token)
        .await
    }

    pub async fn check_session(&self, cookie_value: Option<&str>) -> AuthResult<AuthSession> {
        CheckSessionUseCase::new(self.repo.clone(), self.clock.clone())
            .execute(cookie_value)
            .await
    }

    pub async fn sign_out(&self, cookie_value: Option<&str>) {
        SignOutUseCase::new(self.repo.clone())
            .execute(cookie_value)
            .await
    }
}
