//! Auth Session Entity
//!
//! Represents an authenticated browser session.
//! Stored server-side; the cookie carries only the session id.

use chrono::{DateTime, Utc};
use std::time::Duration;

use platform::clock;

use crate::domain::value_object::{Email, SessionId, UserId};

/// Auth session entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub email: Email,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a new auth session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(
        session_id: SessionId,
        user_id: UserId,
        email: Email,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            session_id,
            user_id,
            email,
            expires_at: clock::add(now, ttl),
        }
    }

    /// Valid iff `now < expires_at`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Expiration as Unix milliseconds (storage form)
    pub fn expires_at_ms(&self) -> i64 {
        self.expires_at.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let session = AuthSession::new(
            SessionId::from_db("s"),
            UserId::new("u").unwrap(),
            Email::from_db("a@x.com"),
            now,
            Duration::from_secs(60),
        );

        assert!(!session.is_expired(now));
        assert!(!session.is_expired(now + TimeDelta::seconds(59)));
        assert!(session.is_expired(now + TimeDelta::seconds(60)));
    }
}
