//! Reminder trigger configuration.
//!
//! Each trigger pairs a cron pattern (six-field, seconds first) with the
//! thresholds its scan uses. Patterns are plain strings so deployments
//! can reshape the schedule without code changes.

use serde::{Deserialize, Serialize};

/// Settings for all reminder triggers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Upcoming-appointment check and daily digest.
    #[serde(default)]
    pub appointment: AppointmentReminderConfig,
    /// Birthday check.
    #[serde(default)]
    pub birthday: BirthdayReminderConfig,
    /// Inactivity check.
    #[serde(default)]
    pub inactivity: InactivityAlertConfig,
    /// Old-notification cleanup.
    #[serde(default)]
    pub cleanup: CleanupConfig,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            appointment: AppointmentReminderConfig::default(),
            birthday: BirthdayReminderConfig::default(),
            inactivity: InactivityAlertConfig::default(),
            cleanup: CleanupConfig::default(),
        }
    }
}

/// Appointment reminder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentReminderConfig {
    /// Send a reminder when an appointment starts within this many hours.
    #[serde(default = "default_before_hours")]
    pub before_hours: i64,
    /// Cron pattern for the rolling upcoming-appointment check.
    #[serde(default = "default_check_cron")]
    pub check_cron: String,
    /// Cron pattern for the daily digest of tomorrow's appointments.
    #[serde(default = "default_digest_cron")]
    pub digest_cron: String,
}

impl Default for AppointmentReminderConfig {
    fn default() -> Self {
        Self {
            before_hours: default_before_hours(),
            check_cron: default_check_cron(),
            digest_cron: default_digest_cron(),
        }
    }
}

/// Birthday reminder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthdayReminderConfig {
    /// How many days ahead a birthday is announced.
    #[serde(default = "default_days_in_advance")]
    pub days_in_advance: i64,
    /// Cron pattern for the daily birthday check.
    #[serde(default = "default_birthday_cron")]
    pub cron: String,
}

impl Default for BirthdayReminderConfig {
    fn default() -> Self {
        Self {
            days_in_advance: default_days_in_advance(),
            cron: default_birthday_cron(),
        }
    }
}

/// Inactive-client alert settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InactivityAlertConfig {
    /// Days without a visit before a client counts as inactive.
    #[serde(default = "default_inactive_days")]
    pub inactive_days: i64,
    /// Cron pattern for the weekly inactivity check.
    #[serde(default = "default_inactivity_cron")]
    pub cron: String,
}

impl Default for InactivityAlertConfig {
    fn default() -> Self {
        Self {
            inactive_days: default_inactive_days(),
            cron: default_inactivity_cron(),
        }
    }
}

/// Old-notification cleanup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupConfig {
    /// Delete notifications older than this many days.
    #[serde(default = "default_older_than_days")]
    pub older_than_days: i64,
    /// Cron pattern for the daily cleanup sweep.
    #[serde(default = "default_cleanup_cron")]
    pub cron: String,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            older_than_days: default_older_than_days(),
            cron: default_cleanup_cron(),
        }
    }
}

fn default_before_hours() -> i64 {
    24
}

/// Every hour on the hour.
fn default_check_cron() -> String {
    "0 0 * * * *".to_string()
}

/// Daily at 08:00.
fn default_digest_cron() -> String {
    "0 0 8 * * *".to_string()
}

fn default_days_in_advance() -> i64 {
    7
}

/// Daily at 09:00.
fn default_birthday_cron() -> String {
    "0 0 9 * * *".to_string()
}

fn default_inactive_days() -> i64 {
    90
}

/// Weekly on Monday at 10:00.
fn default_inactivity_cron() -> String {
    "0 0 10 * * 1".to_string()
}

fn default_older_than_days() -> i64 {
    30
}

/// Daily at midnight.
fn default_cleanup_cron() -> String {
    "0 0 0 * * *".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_cadence() {
        let config = ReminderConfig::default();
        assert_eq!(config.appointment.before_hours, 24);
        assert_eq!(config.birthday.days_in_advance, 7);
        assert_eq!(config.inactivity.inactive_days, 90);
        assert_eq!(config.cleanup.older_than_days, 30);
        assert_eq!(config.appointment.check_cron, "0 0 * * * *");
        assert_eq!(config.inactivity.cron, "0 0 10 * * 1");
    }
}
