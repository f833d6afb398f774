//! Magic Auth Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and mailer traits
//! - `application/` - Use cases and the [`AuthService`] that runs them
//! - `infra/` - Memory and SQLite stores, console and Resend mailers
//! - `presentation/` - HTTP handlers, DTOs, router, session guard
//!
//! ## Flow
//! - `request-link`: rate limit, issue a single-use token, mail the link
//! - `verify`: consume the token, resolve the user, open a session cookie
//! - `session` / `logout`: read or drop the cookie-bound session
//!
//! ## Security Model
//! - Only a keyed digest of each raw token is stored
//! - Token consumption is atomic (one winner under concurrent verifies)
//! - Session cookies are HttpOnly, Secure outside development
//! - The session guard fails closed

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, Environment};
pub use application::service::AuthService;
pub use error::{AuthError, AuthResult};
pub use infra::{ConsoleMailer, MemoryAuthRepository, ResendMailer, SqliteAuthRepository};
pub use presentation::middleware::{AuthenticatedUser, with_session_guard};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::memory::MemoryAuthRepository as MemoryAuthStore;
    pub use crate::infra::sqlite::SqliteAuthRepository as SqliteAuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
