//! In-memory appointment store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use oshapp_core::error::AppError;
use oshapp_core::result::AppResult;
use oshapp_core::types::id::{AppointmentId, EmployeeId};
use oshapp_entity::appointment::Appointment;

use crate::repositories::AppointmentRepository;

/// Appointment store backed by a concurrent map.
#[derive(Debug, Clone, Default)]
pub struct MemoryAppointmentRepository {
    /// Appointment id → appointment.
    rows: Arc<DashMap<AppointmentId, Appointment>>,
}

impl MemoryAppointmentRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored appointments.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn newest_first(mut items: Vec<Appointment>) -> Vec<Appointment> {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }
}

#[async_trait]
impl AppointmentRepository for MemoryAppointmentRepository {
    async fn find_by_id(&self, id: AppointmentId) -> AppResult<Option<Appointment>> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    async fn insert(&self, appointment: &Appointment) -> AppResult<Appointment> {
        match self.rows.entry(appointment.id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Appointment {} already exists",
                appointment.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(appointment.clone());
                debug!(appointment_id = %appointment.id, status = %appointment.status, "Appointment inserted");
                Ok(appointment.clone())
            }
        }
    }

    async fn update(&self, appointment: &Appointment) -> AppResult<Appointment> {
        let mut row = self
            .rows
            .get_mut(&appointment.id)
            .ok_or_else(|| AppError::not_found(format!("Appointment {} not found", appointment.id)))?;

        if row.version != appointment.version {
            return Err(AppError::conflict(format!(
                "Appointment {} was modified concurrently (expected version {}, found {})",
                appointment.id, appointment.version, row.version
            )));
        }

        let mut stored = appointment.clone();
        stored.version = appointment.version + 1;
        *row = stored.clone();

        debug!(
            appointment_id = %stored.id,
            status = %stored.status,
            version = stored.version,
            "Appointment updated"
        );
        Ok(stored)
    }

    async fn delete(&self, id: AppointmentId) -> AppResult<bool> {
        Ok(self.rows.remove(&id).is_some())
    }

    async fn find_by_employee(&self, employee_id: EmployeeId) -> AppResult<Vec<Appointment>> {
        let items = self
            .rows
            .iter()
            .filter(|row| row.employee_id == employee_id)
            .map(|row| row.value().clone())
            .collect();
        Ok(Self::newest_first(items))
    }

    async fn find_all(&self) -> AppResult<Vec<Appointment>> {
        let items = self.rows.iter().map(|row| row.value().clone()).collect();
        Ok(Self::newest_first(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oshapp_core::error::ErrorKind;
    use oshapp_core::types::id::UserId;
    use oshapp_entity::appointment::{AppointmentStatus, AppointmentType};

    fn sample() -> Appointment {
        Appointment::new(
            EmployeeId::new(),
            AppointmentType::Spontaneous,
            AppointmentStatus::RequestedEmployee,
            UserId::new(),
        )
    }

    #[tokio::test]
    async fn test_update_bumps_version() {
        let repo = MemoryAppointmentRepository::new();
        let appt = repo.insert(&sample()).await.unwrap();
        assert_eq!(appt.version, 0);

        let mut changed = appt.clone();
        changed.status = AppointmentStatus::Confirmed;
        let stored = repo.update(&changed).await.unwrap();
        assert_eq!(stored.version, 1);

        let loaded = repo.find_by_id(appt.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, AppointmentStatus::Confirmed);
        assert_eq!(loaded.version, 1);
    }

    #[tokio::test]
    async fn test_stale_update_conflicts() {
        let repo = MemoryAppointmentRepository::new();
        let appt = repo.insert(&sample()).await.unwrap();

        let mut first = appt.clone();
        first.status = AppointmentStatus::Cancelled;
        repo.update(&first).await.unwrap();

        let mut second = appt.clone();
        second.status = AppointmentStatus::Confirmed;
        let err = repo.update(&second).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let loaded = repo.find_by_id(appt.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, AppointmentStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_duplicate_insert_conflicts() {
        let repo = MemoryAppointmentRepository::new();
        let appt = sample();
        repo.insert(&appt).await.unwrap();
        assert!(repo.insert(&appt).await.is_err());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_employee() {
        let repo = MemoryAppointmentRepository::new();
        let mine = sample();
        let other = sample();
        repo.insert(&mine).await.unwrap();
        repo.insert(&other).await.unwrap();

        let found = repo.find_by_employee(mine.employee_id).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, mine.id);
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }
}
