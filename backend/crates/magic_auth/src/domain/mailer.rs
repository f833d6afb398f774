//! Magic link delivery contract

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::value_object::Email;

#[derive(Debug, Error)]
pub enum MailerError {
    /// Request never got a response
    #[error("mail transport failed: {0}")]
    Transport(String),

    /// Provider answered with an error status
    #[error("mail provider rejected request (status {status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Sends a sign-in link to an address. No retries.
#[async_trait]
pub trait MagicLinkMailer: Send + Sync {
    async fn send(&self, email: &Email, link: &str) -> Result<(), MailerError>;
}
