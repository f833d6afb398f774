//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::random::{RandomError, RandomSource};

type HmacSha256 = Hmac<Sha256>;

/// Draw `len` bytes from `rng`
pub fn random_bytes(rng: &dyn RandomSource, len: usize) -> Result<Vec<u8>, RandomError> {
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)?;
    Ok(bytes)
}

/// `len` random bytes, URL-safe base64 without padding
pub fn random_token(rng: &dyn RandomSource, len: usize) -> Result<String, RandomError> {
    Ok(to_base64url(&random_bytes(rng, len)?))
}

/// `len` random bytes, lowercase hex
pub fn random_hex(rng: &dyn RandomSource, len: usize) -> Result<String, RandomError> {
    Ok(hex::encode(random_bytes(rng, len)?))
}

/// Encode bytes as URL-safe base64 (no padding)
pub fn to_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Compute HMAC-SHA256
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// `base64url(HMAC-SHA256(key, data))`
pub fn keyed_digest(key: &[u8], data: &str) -> String {
    to_base64url(&hmac_sha256(key, data.as_bytes()))
}
