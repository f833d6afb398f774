//! Domain Layer
//!
//! - Coaching session record
//! - Validated identifiers
//! - Repository trait

pub mod entities;
pub mod repository;
pub mod value_objects;
