//! Notification entity and its taxonomy.

pub mod category;
pub mod model;
pub mod payload;
pub mod severity;

pub use category::NotificationCategory;
pub use model::Notification;
pub use payload::NotificationPayload;
pub use severity::Severity;
