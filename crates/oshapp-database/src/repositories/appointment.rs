//! Appointment repository contract.

use async_trait::async_trait;

use oshapp_core::result::AppResult;
use oshapp_core::types::id::{AppointmentId, EmployeeId};
use oshapp_entity::appointment::Appointment;

/// Storage for appointments.
#[async_trait]
pub trait AppointmentRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find an appointment by id.
    async fn find_by_id(&self, id: AppointmentId) -> AppResult<Option<Appointment>>;

    /// Insert a new appointment. Fails with `Conflict` if the id exists.
    async fn insert(&self, appointment: &Appointment) -> AppResult<Appointment>;

    /// Replace a stored appointment.
    ///
    /// `appointment.version` must equal the stored version; the stored copy
    /// is written with `version + 1` and returned. A mismatch means another
    /// transition committed first and yields `Conflict`.
    async fn update(&self, appointment: &Appointment) -> AppResult<Appointment>;

    /// Delete an appointment. Returns `true` if a row was removed.
    async fn delete(&self, id: AppointmentId) -> AppResult<bool>;

    /// All appointments of an employee, newest first.
    async fn find_by_employee(&self, employee_id: EmployeeId) -> AppResult<Vec<Appointment>>;

    /// Every appointment, newest first.
    async fn find_all(&self) -> AppResult<Vec<Appointment>>;
}
