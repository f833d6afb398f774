//! Coaching Session Backend Module
//!
//! Records when coaching sessions start and end, and the hash of the
//! finished transcript. Transcripts themselves stay on the client.
//!
//! Clean Architecture structure:
//! - `domain/` - Session record, identifiers, repository trait
//! - `application/` - Start / end use cases
//! - `infra/` - Memory and SQLite implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! All routes require a session from `magic_auth`; the user id always comes
//! from the session guard, never from the request body.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{CoachingError, CoachingResult};
pub use infra::{MemoryCoachingRepository, SqliteCoachingRepository};
pub use presentation::{CoachingAppState, coaching_router};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::memory::MemoryCoachingRepository as MemoryCoachingStore;
    pub use crate::infra::sqlite::SqliteCoachingRepository as SqliteCoachingStore;
}
