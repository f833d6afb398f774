//! Application Layer - Use cases

pub mod end_session;
pub mod start_session;

pub use end_session::{EndSessionInput, EndSessionUseCase};
pub use start_session::{StartSessionInput, StartSessionUseCase};
