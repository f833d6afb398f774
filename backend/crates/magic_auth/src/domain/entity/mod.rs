//! Entity Module

pub mod auth_session;
pub mod auth_token;
pub mod user_identity;

pub use auth_session::AuthSession;
pub use auth_token::AuthToken;
pub use user_identity::UserIdentity;
