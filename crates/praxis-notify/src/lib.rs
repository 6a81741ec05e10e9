//! # praxis-notify
//!
//! The notification core: record creation and queries over the store,
//! plus the dispatcher that persists a record and then pushes it to the
//! recipient's live connection.

pub mod builders;
pub mod dispatcher;
pub mod service;

pub use dispatcher::{NotificationDispatcher, NotificationInput};
pub use service::NotificationService;
