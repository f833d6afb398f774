//! Infrastructure Layer
//!
//! Store backends for coaching session metadata.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryCoachingRepository;
pub use sqlite::SqliteCoachingRepository;
