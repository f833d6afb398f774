//! Token Hash Value Object
//!
//! Keyed digest of a raw magic-link token. The raw token is never stored.

use platform::crypto::keyed_digest;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenHash(String);

impl TokenHash {
    /// `base64url(HMAC-SHA256(secret, raw_token))`
    pub fn derive(secret: &[u8], raw_token: &str) -> Self {
        Self(keyed_digest(secret, raw_token))
    }

    /// Create from database value
    pub fn from_db(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_is_deterministic_and_keyed() {
        let a = TokenHash::derive(b"secret", "raw");
        assert_eq!(a, TokenHash::derive(b"secret", "raw"));
        assert_ne!(a, TokenHash::derive(b"other", "raw"));
        assert_ne!(a.as_str(), "raw");
    }
}
