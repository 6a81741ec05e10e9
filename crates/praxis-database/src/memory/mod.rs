//! In-memory implementations of the persistence and directory traits.
//!
//! Used by tests and local development; behavior mirrors the PostgreSQL
//! repositories, including ordering and scoping rules.

pub mod directory;
pub mod notification;

pub use directory::{MemoryAppointmentDirectory, MemoryClientDirectory};
pub use notification::MemoryNotificationStore;
