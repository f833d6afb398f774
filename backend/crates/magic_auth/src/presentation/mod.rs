//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the session guard.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AuthenticatedUser, require_auth_session, with_session_guard};
pub use router::auth_router;
