//! # praxis-worker
//!
//! Scheduled reminder scans: upcoming-appointment reminders with an
//! idempotence guard, the daily digest, birthday and inactivity checks,
//! and old-notification cleanup, driven by cron triggers.

pub mod scheduler;
pub mod tasks;

pub use scheduler::ReminderScheduler;
pub use tasks::ReminderTasks;
