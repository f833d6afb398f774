//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the mail
//! delivery contract.

pub mod entity;
pub mod mailer;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{AuthSession, AuthToken, UserIdentity};
pub use mailer::{MagicLinkMailer, MailerError};
pub use repository::{AuthSessionRepository, AuthTokenRepository, UserIdentityRepository};
