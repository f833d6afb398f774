//! Auth Token Entity
//!
//! One-time sign-in token as stored: only the hash, never the raw value.
//! `Issued → Consumed` or `Issued → Expired`, both terminal.

use chrono::{DateTime, Utc};
use std::time::Duration;

use platform::clock;

use crate::domain::value_object::{Email, TokenHash};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token_hash: TokenHash,
    pub email: Email,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
}

impl AuthToken {
    /// Fresh, unused token valid for `ttl` from `now`
    pub fn issue(token_hash: TokenHash, email: Email, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token_hash,
            email,
            expires_at: clock::add(now, ttl),
            used: false,
        }
    }

    /// Unused and not yet expired
    pub fn is_consumable(&self, now: DateTime<Utc>) -> bool {
        !self.used && now < self.expires_at
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

    fn token(now: DateTime<Utc>) -> AuthToken {
        AuthToken::issue(
            TokenHash::from_db("h"),
            Email::from_db("a@x.com"),
            now,
            Duration::from_secs(15 * 60),
        )
    }

    #[test]
    fn test_consumable_until_expiry() {
        let now = Utc::now();
        let t = token(now);
        assert!(t.is_consumable(now));
        assert!(t.is_consumable(now + TimeDelta::minutes(14)));
        assert!(!t.is_consumable(now + TimeDelta::minutes(15)));
    }

    #[test]
    fn test_used_is_terminal() {
        let now = Utc::now();
        let mut t = token(now);
        t.used = true;
        assert!(!t.is_consumable(now));
    }
}
