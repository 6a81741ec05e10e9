//! Collaborator traits consumed by the notification core.
//!
//! The store trait is the persistence seam for notification records; the
//! directory traits are read-only views over the rest of the domain that
//! the scheduled reminder scans consult.

pub mod directory;
pub mod store;

pub use directory::{AppointmentDirectory, ClientDirectory};
pub use store::NotificationStore;
