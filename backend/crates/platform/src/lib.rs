//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Injectable clock and random source
//! - Cryptographic utilities (HMAC-SHA256, base64url, hex identifiers)
//! - Cookie management
//! - Client IP extraction
//! - Fixed-window rate limiting

pub mod client;
pub mod clock;
pub mod cookie;
pub mod crypto;
pub mod random;
pub mod rate_limit;
