//! Session ID Value Object
//!
//! 32 random bytes, base64url. Doubles as the cookie value, so `Debug`
//! never prints it.

use platform::crypto::random_token;
use platform::random::{RandomError, RandomSource};

const SESSION_ID_BYTES: usize = 32;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate(rng: &dyn RandomSource) -> Result<Self, RandomError> {
        Ok(Self(random_token(rng, SESSION_ID_BYTES)?))
    }

    /// Cookie value; `None` when empty
    pub fn from_cookie(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(Self(value.to_string()))
        }
    }

    /// Create from database value
    pub fn from_db(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionId(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::random::SequenceRandom;

    #[test]
    fn test_debug_is_redacted() {
        let id = SessionId::from_db("super-secret");
        assert_eq!(format!("{id:?}"), "SessionId(..)");
    }

    #[test]
    fn test_from_cookie() {
        assert!(SessionId::from_cookie("").is_none());
        assert_eq!(SessionId::from_cookie("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_generate_length() {
        let id = SessionId::generate(&SequenceRandom::new(3)).unwrap();
        assert_eq!(id.as_str().len(), 43);
    }
}
