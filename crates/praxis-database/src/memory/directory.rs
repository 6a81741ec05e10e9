//! In-memory appointment and client directories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use praxis_core::result::AppResult;
use praxis_entity::appointment::Appointment;
use praxis_entity::client::Client;
use praxis_entity::traits::{AppointmentDirectory, ClientDirectory};

/// Appointment directory backed by an in-memory vector.
#[derive(Debug, Default)]
pub struct MemoryAppointmentDirectory {
    appointments: RwLock<Vec<Appointment>>,
}

impl MemoryAppointmentDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an appointment.
    pub async fn add(&self, appointment: Appointment) {
        self.appointments.write().await.push(appointment);
    }
}

#[async_trait]
impl AppointmentDirectory for MemoryAppointmentDirectory {
    async fn find_starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Appointment>> {
        let appointments = self.appointments.read().await;
        let mut found: Vec<Appointment> = appointments
            .iter()
            .filter(|a| a.is_pending() && a.start_at >= from && a.start_at < to)
            .cloned()
            .collect();
        found.sort_by_key(|a| a.start_at);
        Ok(found)
    }
}

/// Client directory backed by an in-memory vector.
#[derive(Debug, Default)]
pub struct MemoryClientDirectory {
    clients: RwLock<Vec<Client>>,
}

impl MemoryClientDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a client.
    pub async fn add(&self, client: Client) {
        self.clients.write().await.push(client);
    }
}

#[async_trait]
impl ClientDirectory for MemoryClientDirectory {
    async fn find_with_birth_dates(&self) -> AppResult<Vec<Client>> {
        let clients = self.clients.read().await;
        Ok(clients
            .iter()
            .filter(|c| c.birth_date.is_some())
            .cloned()
            .collect())
    }

    async fn find_inactive(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<Client>> {
        let clients = self.clients.read().await;
        Ok(clients
            .iter()
            .filter(|c| c.inactive_since(cutoff))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use praxis_core::types::id::{AppointmentId, ClientId};
    use praxis_entity::appointment::AppointmentStatus;

    fn appointment(start_at: DateTime<Utc>, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: AppointmentId::new(),
            client_id: ClientId::new(),
            title: "Consultation".to_string(),
            start_at,
            end_at: start_at + Duration::minutes(45),
            status,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_window_excludes_cancelled_and_out_of_range() {
        let directory = MemoryAppointmentDirectory::new();
        let from = Utc::now();
        let to = from + Duration::hours(24);

        let inside = appointment(from + Duration::hours(3), AppointmentStatus::Pending);
        directory.add(inside.clone()).await;
        directory
            .add(appointment(from + Duration::hours(5), AppointmentStatus::Cancelled))
            .await;
        directory
            .add(appointment(to + Duration::hours(1), AppointmentStatus::Pending))
            .await;

        let found = directory.find_starting_between(from, to).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, inside.id);
    }

    #[tokio::test]
    async fn test_inactive_includes_never_visited() {
        let directory = MemoryClientDirectory::new();
        let cutoff = Utc::now() - Duration::days(90);

        directory
            .add(Client {
                id: ClientId::new(),
                first_name: "Ada".to_string(),
                last_name: "Byron".to_string(),
                email: None,
                birth_date: None,
                last_visit_at: None,
                created_at: Utc::now(),
            })
            .await;
        directory
            .add(Client {
                id: ClientId::new(),
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                email: None,
                birth_date: None,
                last_visit_at: Some(Utc::now() - Duration::days(5)),
                created_at: Utc::now(),
            })
            .await;

        let inactive = directory.find_inactive(cutoff).await.unwrap();
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].first_name, "Ada");
    }
}
