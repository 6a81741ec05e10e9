//! End-to-end pipeline tests: reminder scan through dispatch to the
//! live channel, over the in-memory backends.

use std::sync::Arc;

use chrono::{Duration, Utc};

use praxis_core::config::{NotificationsConfig, ReminderConfig};
use praxis_core::types::id::{AppointmentId, ClientId, RecipientId};
use praxis_database::memory::{
    MemoryAppointmentDirectory, MemoryClientDirectory, MemoryNotificationStore,
};
use praxis_entity::appointment::{Appointment, AppointmentStatus};
use praxis_entity::notification::NotificationCategory;
use praxis_entity::traits::NotificationStore;
use praxis_notify::dispatcher::NotificationDispatcher;
use praxis_notify::service::NotificationService;
use praxis_realtime::registry::ConnectionRegistry;
use praxis_worker::tasks::ReminderTasks;

struct Pipeline {
    tasks: ReminderTasks,
    store: Arc<MemoryNotificationStore>,
    appointments: Arc<MemoryAppointmentDirectory>,
    registry: Arc<ConnectionRegistry>,
}

fn pipeline() -> Pipeline {
    let store = Arc::new(MemoryNotificationStore::new());
    let appointments = Arc::new(MemoryAppointmentDirectory::new());
    let clients = Arc::new(MemoryClientDirectory::new());
    let registry = Arc::new(ConnectionRegistry::new(16));

    let dispatcher = Arc::new(NotificationDispatcher::new(
        NotificationService::new(store.clone()),
        registry.clone(),
        NotificationsConfig::default(),
    ));
    let tasks = ReminderTasks::new(
        dispatcher,
        appointments.clone(),
        clients,
        ReminderConfig::default(),
    );

    Pipeline {
        tasks,
        store,
        appointments,
        registry,
    }
}

fn upcoming_appointment(client_id: ClientId) -> Appointment {
    let start_at = Utc::now() + Duration::hours(4);
    Appointment {
        id: AppointmentId::new(),
        client_id,
        title: "Consultation".to_string(),
        start_at,
        end_at: start_at + Duration::minutes(45),
        status: AppointmentStatus::Pending,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_scan_persists_and_pushes_to_connected_client() {
    let pipeline = pipeline();
    let client_id = ClientId::new();
    let recipient = RecipientId::from(client_id);

    pipeline
        .appointments
        .add(upcoming_appointment(client_id))
        .await;
    let (_handle, mut rx) = pipeline.registry.register(recipient);

    assert_eq!(pipeline.tasks.check_upcoming_appointments().await.unwrap(), 1);

    // Persisted...
    let unread = pipeline.store.list_unread(recipient).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].category, NotificationCategory::AppointmentReminder);

    // ...and pushed over the live channel with the wire envelope.
    let frame = rx.recv().await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
    assert_eq!(value["event"], "notification");
    assert_eq!(value["data"]["category"], "appointment_reminder");
    assert_eq!(value["data"]["payload"]["kind"], "appointment_reminder");
}

#[tokio::test]
async fn test_scan_persists_for_offline_client() {
    let pipeline = pipeline();
    let client_id = ClientId::new();

    pipeline
        .appointments
        .add(upcoming_appointment(client_id))
        .await;

    assert_eq!(pipeline.tasks.check_upcoming_appointments().await.unwrap(), 1);
    let unread = pipeline
        .store
        .list_unread(RecipientId::from(client_id))
        .await
        .unwrap();
    assert_eq!(unread.len(), 1);
}

#[tokio::test]
async fn test_repeat_scan_sends_no_duplicate_push() {
    let pipeline = pipeline();
    let client_id = ClientId::new();
    let recipient = RecipientId::from(client_id);

    pipeline
        .appointments
        .add(upcoming_appointment(client_id))
        .await;
    let (_handle, mut rx) = pipeline.registry.register(recipient);

    pipeline.tasks.check_upcoming_appointments().await.unwrap();
    pipeline.tasks.check_upcoming_appointments().await.unwrap();

    assert!(rx.recv().await.is_some());
    assert!(rx.try_recv().is_err());
    assert_eq!(pipeline.store.len().await, 1);
}
