//! Reminder scan implementations.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, error, info};

use praxis_core::config::ReminderConfig;
use praxis_core::result::AppResult;
use praxis_core::types::id::RecipientId;
use praxis_entity::traits::{AppointmentDirectory, ClientDirectory};
use praxis_notify::builders;
use praxis_notify::dispatcher::NotificationDispatcher;

/// The reminder scans run by the cron triggers.
///
/// Each scan is a plain async method so it can be run directly from a
/// trigger closure or from tests. Per-record dispatch failures are
/// logged and skipped so one bad record cannot starve the rest of a
/// scan.
#[derive(Clone)]
pub struct ReminderTasks {
    dispatcher: Arc<NotificationDispatcher>,
    appointments: Arc<dyn AppointmentDirectory>,
    clients: Arc<dyn ClientDirectory>,
    config: ReminderConfig,
}

impl std::fmt::Debug for ReminderTasks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReminderTasks").finish()
    }
}

impl ReminderTasks {
    /// Create the scan set.
    pub fn new(
        dispatcher: Arc<NotificationDispatcher>,
        appointments: Arc<dyn AppointmentDirectory>,
        clients: Arc<dyn ClientDirectory>,
        config: ReminderConfig,
    ) -> Self {
        Self {
            dispatcher,
            appointments,
            clients,
            config,
        }
    }

    /// Remind clients about appointments starting within the configured
    /// lead window. A reminder already sent for an appointment within
    /// the same window suppresses a second one, so the hourly trigger
    /// can re-run safely.
    pub async fn check_upcoming_appointments(&self) -> AppResult<u64> {
        let lead = Duration::hours(self.config.appointment.before_hours);
        let now = Utc::now();
        let upcoming = self
            .appointments
            .find_starting_between(now, now + lead)
            .await?;

        let since = now - lead;
        let mut sent = 0;
        for appointment in upcoming {
            let already_sent = self
                .dispatcher
                .service()
                .has_reminder_for_appointment(appointment.id, since)
                .await?;
            if already_sent {
                debug!(appointment_id = %appointment.id, "Reminder already sent, skipping");
                continue;
            }

            let input = builders::appointment_reminder(
                RecipientId::from(appointment.client_id),
                &appointment,
            );
            match self.dispatcher.create_and_send(input).await {
                Ok(_) => sent += 1,
                Err(e) => {
                    error!(
                        appointment_id = %appointment.id,
                        error = %e,
                        "Failed to send appointment reminder"
                    );
                }
            }
        }

        info!(sent, "Upcoming appointment scan finished");
        Ok(sent)
    }

    /// Send tomorrow's appointment reminders in one morning batch. Runs
    /// without the idempotence probe; the digest intentionally repeats
    /// what the rolling scan may already have sent.
    pub async fn send_daily_digest(&self) -> AppResult<u64> {
        let tomorrow = (Utc::now() + Duration::days(1))
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc();
        let appointments = self
            .appointments
            .find_starting_between(tomorrow, tomorrow + Duration::days(1))
            .await?;

        let mut sent = 0;
        for appointment in appointments {
            let input = builders::appointment_reminder(
                RecipientId::from(appointment.client_id),
                &appointment,
            );
            match self.dispatcher.create_and_send(input).await {
                Ok(_) => sent += 1,
                Err(e) => {
                    error!(
                        appointment_id = %appointment.id,
                        error = %e,
                        "Failed to send digest reminder"
                    );
                }
            }
        }

        info!(sent, "Daily digest finished");
        Ok(sent)
    }

    /// Send birthday reminders for clients whose birthday falls within
    /// the configured advance window.
    pub async fn check_birthdays(&self) -> AppResult<u64> {
        let today = Utc::now().date_naive();
        let days = self.config.birthday.days_in_advance.max(0) as u32;
        let clients = self.clients.find_with_birth_dates().await?;

        let mut sent = 0;
        for client in clients {
            if !client.birthday_within(today, days) {
                continue;
            }
            let Some(input) = builders::birthday_reminder(&client) else {
                continue;
            };
            match self.dispatcher.create_and_send(input).await {
                Ok(_) => sent += 1,
                Err(e) => {
                    error!(client_id = %client.id, error = %e, "Failed to send birthday reminder");
                }
            }
        }

        info!(sent, "Birthday scan finished");
        Ok(sent)
    }

    /// Alert clients who have had no visit for the configured stretch.
    pub async fn check_inactive_clients(&self) -> AppResult<u64> {
        let cutoff = Utc::now() - Duration::days(self.config.inactivity.inactive_days);
        let inactive = self.clients.find_inactive(cutoff).await?;

        let mut sent = 0;
        for client in inactive {
            let input = builders::inactivity_alert(&client);
            match self.dispatcher.create_and_send(input).await {
                Ok(_) => sent += 1,
                Err(e) => {
                    error!(client_id = %client.id, error = %e, "Failed to send inactivity alert");
                }
            }
        }

        info!(sent, "Inactivity scan finished");
        Ok(sent)
    }

    /// Delete notifications older than the configured retention window.
    pub async fn cleanup_old_notifications(&self) -> AppResult<u64> {
        let cutoff = Utc::now() - Duration::days(self.config.cleanup.older_than_days);
        let removed = self
            .dispatcher
            .service()
            .delete_older_than(cutoff)
            .await?;
        info!(removed, "Notification cleanup finished");
        Ok(removed)
    }
}
