//! Email Value Object
//!
//! Represents a normalized email address.
//! Validation is intentionally permissive; ownership is proven by the
//! magic link itself.

use serde::Serialize;
use std::str::FromStr;

use crate::error::{AuthError, AuthResult};

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Trim, lowercase, and require a non-empty value containing `@`
    pub fn new(email: impl AsRef<str>) -> AuthResult<Self> {
        let email = email.as_ref().trim().to_lowercase();

        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::InvalidEmail);
        }

        Ok(Self(email))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `p***m` form safe for logs
    pub fn redacted(&self) -> String {
        let mut chars = self.0.chars();
        match (chars.next(), chars.next_back()) {
            (Some(first), Some(last)) if self.0.chars().count() >= 3 => {
                format!("{first}***{last}")
            }
            _ => "***".to_string(),
        }
    }
}

impl FromStr for Email {
    type Err = AuthError;

    fn from_str(s: &str) -> AuthResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
