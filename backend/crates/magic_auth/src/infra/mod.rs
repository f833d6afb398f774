//! Infrastructure Layer
//!
//! Store backends and outbound mail delivery.

pub mod mailer;
pub mod memory;
pub mod sqlite;

pub use mailer::{ConsoleMailer, ResendMailer};
pub use memory::MemoryAuthRepository;
pub use sqlite::SqliteAuthRepository;
