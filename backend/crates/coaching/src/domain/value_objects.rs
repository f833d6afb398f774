//! Value Objects

use std::fmt;

use crate::error::{CoachingError, CoachingResult};

/// Client-supplied coaching session identifier (trimmed, non-empty)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoachingSessionId(String);

impl CoachingSessionId {
    pub fn new(raw: &str) -> CoachingResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoachingError::MissingSessionId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CoachingSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Digest of the finished transcript, computed client-side (trimmed, non-empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptHash(String);

impl TranscriptHash {
    pub fn new(raw: &str) -> CoachingResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoachingError::MissingTranscriptHash);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
