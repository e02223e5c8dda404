//! Appointment entity model.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use oshapp_core::types::id::{AppointmentId, CommentId, EmployeeId, UserId};

use super::kind::AppointmentType;
use super::status::AppointmentStatus;
use super::visit_mode::VisitMode;

/// An occupational-medicine appointment.
///
/// Employees, staff and authors are referenced by id only. Appointment
/// dates are wall-clock times at the medical service, hence `NaiveDateTime`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique appointment identifier.
    pub id: AppointmentId,
    /// The employee being seen.
    pub employee_id: EmployeeId,
    /// Assigned nurse, if any.
    pub nurse_id: Option<UserId>,
    /// Assigned doctor, if any.
    pub doctor_id: Option<UserId>,
    /// User who created the appointment.
    pub created_by: Option<UserId>,
    /// User who performed the last transition.
    pub updated_by: Option<UserId>,
    /// Reason for the visit.
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    /// Workflow status.
    pub status: AppointmentStatus,
    /// On-site or remote.
    pub visit_mode: Option<VisitMode>,
    /// Whether RH made the visit mandatory.
    pub is_obligatory: bool,
    /// Date wished by the employee.
    pub requested_date_employee: Option<NaiveDateTime>,
    /// Date proposed by medical staff.
    pub proposed_date: Option<NaiveDateTime>,
    /// Agreed date.
    pub scheduled_time: Option<NaiveDateTime>,
    /// Free-text motive given at request time (medical-only).
    pub motif: Option<String>,
    /// Free-text notes given at request time (medical-only).
    pub notes: Option<String>,
    /// Preparation instructions for the employee (medical-only).
    pub medical_instructions: Option<String>,
    /// Contact phone of the medical service (medical-only).
    pub medical_service_phone: Option<String>,
    /// Reason given when cancelling.
    pub cancellation_reason: Option<String>,
    /// Discussion thread, oldest first.
    #[serde(default)]
    pub comments: Vec<AppointmentComment>,
    /// When the appointment was created.
    pub created_at: DateTime<Utc>,
    /// When the appointment was last modified.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter, bumped on every committed change.
    #[serde(default)]
    pub version: u64,
}

/// A comment left on an appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentComment {
    /// Unique comment identifier.
    pub id: CommentId,
    /// Comment author.
    pub author_id: UserId,
    /// Comment text.
    pub text: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Create a fresh appointment in an initial status.
    pub fn new(
        employee_id: EmployeeId,
        kind: AppointmentType,
        status: AppointmentStatus,
        created_by: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: AppointmentId::new(),
            employee_id,
            nurse_id: None,
            doctor_id: None,
            created_by: Some(created_by),
            updated_by: Some(created_by),
            kind,
            status,
            visit_mode: None,
            is_obligatory: false,
            requested_date_employee: None,
            proposed_date: None,
            scheduled_time: None,
            motif: None,
            notes: None,
            medical_instructions: None,
            medical_service_phone: None,
            cancellation_reason: None,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// The authoritative date: scheduled, then proposed, then requested.
    pub fn effective_date(&self) -> Option<NaiveDateTime> {
        self.scheduled_time
            .or(self.proposed_date)
            .or(self.requested_date_employee)
    }

    /// Whether the appointment reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Record who performed the latest change.
    pub fn touch(&mut self, actor: UserId) {
        self.updated_by = Some(actor);
        self.updated_at = Utc::now();
    }

    /// Append a comment.
    pub fn add_comment(&mut self, author_id: UserId, text: impl Into<String>) -> &AppointmentComment {
        self.comments.push(AppointmentComment {
            id: CommentId::new(),
            author_id,
            text: text.into(),
            created_at: Utc::now(),
        });
        &self.comments[self.comments.len() - 1]
    }

    /// The newest non-blank comment text.
    pub fn latest_comment(&self) -> Option<&str> {
        self.comments
            .iter()
            .rev()
            .map(|c| c.text.trim())
            .find(|t| !t.is_empty())
    }

    /// Whether the given user is assigned as nurse or doctor.
    pub fn is_assigned_staff(&self, user_id: UserId) -> bool {
        self.nurse_id == Some(user_id) || self.doctor_id == Some(user_id)
    }

    /// The user credited with the latest action (last updater, else creator).
    pub fn last_actor(&self) -> Option<UserId> {
        self.updated_by.or(self.created_by)
    }
}
