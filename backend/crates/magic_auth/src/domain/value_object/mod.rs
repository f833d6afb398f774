//! Value Object Module

pub mod email;
pub mod session_id;
pub mod token_hash;
pub mod user_id;

pub use email::Email;
pub use session_id::SessionId;
pub use token_hash::TokenHash;
pub use user_id::UserId;
