//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod request_link;
pub mod service;
pub mod sign_out;
pub mod verify_token;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::{AuthConfig, Environment, RateLimitPolicy};
pub use request_link::{RequestLinkInput, RequestLinkOutput, RequestLinkUseCase};
pub use service::AuthService;
pub use sign_out::SignOutUseCase;
pub use verify_token::VerifyTokenUseCase;
