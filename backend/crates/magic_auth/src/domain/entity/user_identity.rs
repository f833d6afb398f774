//! User Identity Entity
//!
//! Email to stable user id mapping. Immutable once created.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{Email, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: UserId,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}
