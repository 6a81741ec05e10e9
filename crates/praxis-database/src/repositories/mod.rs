//! PostgreSQL repository implementations of the Praxis persistence and
//! directory traits.

pub mod appointment;
pub mod client;
pub mod notification;

pub use appointment::AppointmentRepository;
pub use client::ClientRepository;
pub use notification::NotificationRepository;
