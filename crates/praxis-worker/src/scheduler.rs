//! Cron scheduler wiring the reminder scans to their triggers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::{error, info};

use praxis_core::config::ReminderConfig;
use praxis_core::error::AppError;

use crate::tasks::ReminderTasks;

/// Owns the cron scheduler and the registered reminder triggers.
pub struct ReminderScheduler {
    scheduler: JobScheduler,
    tasks: Arc<ReminderTasks>,
    config: ReminderConfig,
    started: AtomicBool,
}

impl std::fmt::Debug for ReminderScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReminderScheduler")
            .field("started", &self.started.load(Ordering::SeqCst))
            .finish()
    }
}

impl ReminderScheduler {
    /// Create a new scheduler over the given scan set.
    pub async fn new(tasks: Arc<ReminderTasks>, config: ReminderConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            tasks,
            config,
            started: AtomicBool::new(false),
        })
    }

    /// Register all reminder triggers.
    pub async fn register_all(&self) -> Result<(), AppError> {
        self.register_upcoming_check().await?;
        self.register_daily_digest().await?;
        self.register_birthday_check().await?;
        self.register_inactivity_check().await?;
        self.register_cleanup().await?;

        info!("All reminder triggers registered");
        Ok(())
    }

    /// Start firing triggers. Safe to call more than once.
    pub async fn start(&self) -> Result<(), AppError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to start scheduler: {e}")))?;

        info!("Reminder scheduler started");
        Ok(())
    }

    /// Stop firing triggers. Safe to call more than once.
    pub async fn stop(&self) -> Result<(), AppError> {
        if !self.started.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        let mut scheduler = self.scheduler.clone();
        scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to shut down scheduler: {e}")))?;

        info!("Reminder scheduler stopped");
        Ok(())
    }

    /// Rolling upcoming-appointment check.
    async fn register_upcoming_check(&self) -> Result<(), AppError> {
        let tasks = Arc::clone(&self.tasks);
        let job = CronJob::new_async(self.config.appointment.check_cron.as_str(), move |_uuid, _lock| {
            let tasks = Arc::clone(&tasks);
            Box::pin(async move {
                if let Err(e) = tasks.check_upcoming_appointments().await {
                    error!(error = %e, "Upcoming appointment scan failed");
                }
            })
        })
        .map_err(|e| AppError::scheduler(format!("Failed to create upcoming check: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to add upcoming check: {e}")))?;

        info!(cron = %self.config.appointment.check_cron, "Registered: upcoming appointment check");
        Ok(())
    }

    /// Morning digest of tomorrow's appointments.
    async fn register_daily_digest(&self) -> Result<(), AppError> {
        let tasks = Arc::clone(&self.tasks);
        let job = CronJob::new_async(self.config.appointment.digest_cron.as_str(), move |_uuid, _lock| {
            let tasks = Arc::clone(&tasks);
            Box::pin(async move {
                if let Err(e) = tasks.send_daily_digest().await {
                    error!(error = %e, "Daily digest failed");
                }
            })
        })
        .map_err(|e| AppError::scheduler(format!("Failed to create daily digest: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to add daily digest: {e}")))?;

        info!(cron = %self.config.appointment.digest_cron, "Registered: daily digest");
        Ok(())
    }

    /// Daily birthday check.
    async fn register_birthday_check(&self) -> Result<(), AppError> {
        let tasks = Arc::clone(&self.tasks);
        let job = CronJob::new_async(self.config.birthday.cron.as_str(), move |_uuid, _lock| {
            let tasks = Arc::clone(&tasks);
            Box::pin(async move {
                if let Err(e) = tasks.check_birthdays().await {
                    error!(error = %e, "Birthday scan failed");
                }
            })
        })
        .map_err(|e| AppError::scheduler(format!("Failed to create birthday check: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to add birthday check: {e}")))?;

        info!(cron = %self.config.birthday.cron, "Registered: birthday check");
        Ok(())
    }

    /// Weekly inactivity check.
    async fn register_inactivity_check(&self) -> Result<(), AppError> {
        let tasks = Arc::clone(&self.tasks);
        let job = CronJob::new_async(self.config.inactivity.cron.as_str(), move |_uuid, _lock| {
            let tasks = Arc::clone(&tasks);
            Box::pin(async move {
                if let Err(e) = tasks.check_inactive_clients().await {
                    error!(error = %e, "Inactivity scan failed");
                }
            })
        })
        .map_err(|e| AppError::scheduler(format!("Failed to create inactivity check: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to add inactivity check: {e}")))?;

        info!(cron = %self.config.inactivity.cron, "Registered: inactivity check");
        Ok(())
    }

    /// Nightly old-notification cleanup.
    async fn register_cleanup(&self) -> Result<(), AppError> {
        let tasks = Arc::clone(&self.tasks);
        let job = CronJob::new_async(self.config.cleanup.cron.as_str(), move |_uuid, _lock| {
            let tasks = Arc::clone(&tasks);
            Box::pin(async move {
                if let Err(e) = tasks.cleanup_old_notifications().await {
                    error!(error = %e, "Notification cleanup failed");
                }
            })
        })
        .map_err(|e| AppError::scheduler(format!("Failed to create cleanup trigger: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to add cleanup trigger: {e}")))?;

        info!(cron = %self.config.cleanup.cron, "Registered: notification cleanup");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use praxis_core::config::NotificationsConfig;
    use praxis_database::memory::{
        MemoryAppointmentDirectory, MemoryClientDirectory, MemoryNotificationStore,
    };
    use praxis_notify::dispatcher::NotificationDispatcher;
    use praxis_notify::service::NotificationService;
    use praxis_realtime::registry::ConnectionRegistry;

    fn tasks() -> Arc<ReminderTasks> {
        let dispatcher = Arc::new(NotificationDispatcher::new(
            NotificationService::new(Arc::new(MemoryNotificationStore::new())),
            Arc::new(ConnectionRegistry::new(8)),
            NotificationsConfig::default(),
        ));
        Arc::new(ReminderTasks::new(
            dispatcher,
            Arc::new(MemoryAppointmentDirectory::new()),
            Arc::new(MemoryClientDirectory::new()),
            ReminderConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_register_and_lifecycle() {
        let scheduler = ReminderScheduler::new(tasks(), ReminderConfig::default())
            .await
            .unwrap();
        scheduler.register_all().await.unwrap();

        scheduler.start().await.unwrap();
        // Second start is a no-op.
        scheduler.start().await.unwrap();

        scheduler.stop().await.unwrap();
        // Second stop is a no-op.
        scheduler.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_cron_is_rejected() {
        let mut config = ReminderConfig::default();
        config.birthday.cron = "not a cron".to_string();

        let scheduler = ReminderScheduler::new(tasks(), config).await.unwrap();
        let err = scheduler.register_all().await.unwrap_err();
        assert_eq!(err.kind, praxis_core::error::ErrorKind::Scheduler);
    }
}
