//! Presentation Layer
//!
//! HTTP handlers, DTOs and router. Every route sits behind the auth
//! session guard.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::CoachingAppState;
pub use router::coaching_router;
