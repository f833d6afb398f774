//! User ID Value Object
//!
//! Opaque 128-bit identifier, hex encoded. Never empty.

use platform::crypto::random_hex;
use platform::random::{RandomError, RandomSource};
use serde::Serialize;

/// Byte length of a freshly generated id
const USER_ID_BYTES: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Generate a new random id (32 hex chars)
    pub fn generate(rng: &dyn RandomSource) -> Result<Self, RandomError> {
        Ok(Self(random_hex(rng, USER_ID_BYTES)?))
    }

    /// Wrap a stored id; `None` when empty
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::random::SequenceRandom;

    #[test]
    fn test_generate_is_hex() {
        let rng = SequenceRandom::new(1);
        let id = UserId::generate(&rng).unwrap();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, UserId::generate(&rng).unwrap());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(UserId::new("").is_none());
        assert!(UserId::new("  ").is_none());
        assert!(UserId::new("abc").is_some());
    }
}
