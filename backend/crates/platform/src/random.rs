//! Random byte sources

use std::sync::Mutex;

use rand::{RngCore, rngs::OsRng};
use thiserror::Error;

/// The random source could not produce bytes
#[derive(Debug, Error)]
#[error("random source failure: {0}")]
pub struct RandomError(pub String);

/// Cryptographically secure random byte provider
pub trait RandomSource: Send + Sync {
    fn fill(&self, buf: &mut [u8]) -> Result<(), RandomError>;
}

/// OS CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<(), RandomError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| RandomError(e.to_string()))
    }
}

/// Deterministic byte counter.
///
/// Every call continues where the previous one stopped, so consecutive
/// draws never repeat until the counter wraps. Not for production use.
#[derive(Debug, Default)]
pub struct SequenceRandom {
    next: Mutex<u64>,
}

impl SequenceRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            next: Mutex::new(seed),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<(), RandomError> {
        let mut next = self.next.lock().unwrap_or_else(|e| e.into_inner());
        for chunk in buf.chunks_mut(8) {
            let bytes = next.to_be_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
            *next = next.wrapping_add(1);
        }
        Ok(())
    }
}

/// Always fails; lets callers exercise their error path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingRandom;

impl RandomSource for FailingRandom {
    fn fill(&self, _buf: &mut [u8]) -> Result<(), RandomError> {
        Err(RandomError("entropy unavailable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_random_fills() {
        let mut buf = [0u8; 32];
        OsRandom.fill(&mut buf).unwrap();
        // Should not be all zeros (statistically)
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_sequence_random_is_deterministic_and_advancing() {
        let a = SequenceRandom::new(7);
        let b = SequenceRandom::new(7);

        let mut first_a = [0u8; 32];
        let mut first_b = [0u8; 32];
        a.fill(&mut first_a).unwrap();
        b.fill(&mut first_b).unwrap();
        assert_eq!(first_a, first_b);

        let mut second_a = [0u8; 32];
        a.fill(&mut second_a).unwrap();
        assert_ne!(first_a, second_a);
    }

    #[test]
    fn test_failing_random() {
        let mut buf = [0u8; 4];
        assert!(FailingRandom.fill(&mut buf).is_err());
    }
}
