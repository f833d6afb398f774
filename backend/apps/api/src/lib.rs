//! Coach API
//!
//! HTTP entry point for magic-link auth and coaching session metadata.

pub mod app;
pub mod config;

pub use app::build_app;
pub use config::ApiConfig;
