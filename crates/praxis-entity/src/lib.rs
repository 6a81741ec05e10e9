//! Domain entity models for Praxis, plus the collaborator traits the
//! notification core consumes (record store and read-only domain
//! directories).

pub mod appointment;
pub mod client;
pub mod document;
pub mod invoice;
pub mod notification;
pub mod traits;
