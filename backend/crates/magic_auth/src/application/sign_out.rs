//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::domain::repository::AuthSessionRepository;
use crate::domain::value_object::SessionId;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    session_repo: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Never fails; a delete error is logged and the caller still clears
    /// the cookie.
    pub async fn execute(&self, cookie_value: Option<&str>) {
        if let Some(session_id) = cookie_value.and_then(SessionId::from_cookie) {
            if let Err(e) = self.session_repo.delete(&session_id).await {
                tracing::warn!(error = %e, "Failed to delete session on logout");
            }
        }

        tracing::info!(event = "auth_logout", "User signed out");
    }
}
