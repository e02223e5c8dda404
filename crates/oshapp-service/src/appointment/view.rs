//! Caller-facing appointment projection.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use oshapp_core::types::id::{AppointmentId, EmployeeId};
use oshapp_entity::appointment::visit_mode::mode_label;
use oshapp_entity::appointment::{
    Appointment, AppointmentComment, AppointmentStatus, AppointmentType, VisitMode,
};
use oshapp_entity::user::Employee;

use crate::context::RequestContext;
use crate::policy::VisibilityPolicy;

use super::machine::Transition;

/// An appointment as seen by one viewer, with restricted fields removed
/// and the actions that viewer may take.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentView {
    /// Appointment identifier.
    pub id: AppointmentId,
    /// The employee being seen.
    pub employee_id: EmployeeId,
    /// Employee full name, when known.
    pub employee_name: Option<String>,
    /// Visit type.
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    /// Long type label.
    pub type_label: &'static str,
    /// Workflow status.
    pub status: AppointmentStatus,
    /// Long status label.
    pub status_label: &'static str,
    /// UI bucket.
    pub status_category: &'static str,
    /// Visit mode.
    pub visit_mode: Option<VisitMode>,
    /// Visit mode label.
    pub visit_mode_label: &'static str,
    /// Whether RH made the visit mandatory.
    pub is_obligatory: bool,
    /// Authoritative date.
    pub date: Option<NaiveDateTime>,
    /// Date wished by the employee.
    pub requested_date_employee: Option<NaiveDateTime>,
    /// Date proposed by medical staff.
    pub proposed_date: Option<NaiveDateTime>,
    /// Agreed date.
    pub scheduled_time: Option<NaiveDateTime>,
    /// Motive, hidden from RH and managers.
    pub motif: Option<String>,
    /// Notes, hidden from RH and managers.
    pub notes: Option<String>,
    /// Instructions, for the employee and medical staff only.
    pub medical_instructions: Option<String>,
    /// Service phone, for the employee and medical staff only.
    pub medical_service_phone: Option<String>,
    /// Reason given when cancelling.
    pub cancellation_reason: Option<String>,
    /// Discussion thread.
    pub comments: Vec<AppointmentComment>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Viewer may confirm.
    pub can_confirm: bool,
    /// Viewer may cancel.
    pub can_cancel: bool,
    /// Viewer may propose a slot.
    pub can_propose: bool,
    /// Viewer may comment.
    pub can_comment: bool,
}

impl AppointmentView {
    /// Project an appointment for the viewer.
    pub fn project(appointment: &Appointment, employee: &Employee, viewer: &RequestContext) -> Self {
        let see_motif = VisibilityPolicy::can_see_motif(viewer, employee);
        let see_private = VisibilityPolicy::can_see_private(viewer, employee);
        let status = appointment.status;

        let can = |t: Transition| t.permits(viewer, employee) && t.allowed_from(status);

        Self {
            id: appointment.id,
            employee_id: appointment.employee_id,
            employee_name: employee.full_name(),
            kind: appointment.kind,
            type_label: appointment.kind.display_label(),
            status,
            status_label: status.label(),
            status_category: status.ui_category(),
            visit_mode: appointment.visit_mode,
            visit_mode_label: mode_label(appointment.visit_mode),
            is_obligatory: appointment.is_obligatory,
            date: appointment.effective_date(),
            requested_date_employee: appointment.requested_date_employee,
            proposed_date: appointment.proposed_date,
            scheduled_time: appointment.scheduled_time,
            motif: appointment.motif.clone().filter(|_| see_motif),
            notes: appointment.notes.clone().filter(|_| see_motif),
            medical_instructions: appointment.medical_instructions.clone().filter(|_| see_private),
            medical_service_phone: appointment
                .medical_service_phone
                .clone()
                .filter(|_| see_private),
            cancellation_reason: appointment.cancellation_reason.clone(),
            comments: appointment.comments.clone(),
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
            can_confirm: can(Transition::ConfirmByEmployee) || can(Transition::ConfirmByMedicalStaff),
            can_cancel: can(Transition::Cancel),
            can_propose: can(Transition::ProposeSlot),
            can_comment: VisibilityPolicy::can_comment(viewer, employee),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oshapp_core::types::id::UserId;
    use oshapp_entity::user::Role;

    fn fixture(status: AppointmentStatus) -> (Employee, Appointment, UserId) {
        let manager = UserId::new();
        let employee =
            Employee::new(UserId::new(), "Sara", "Alaoui").with_managers(Some(manager), None);
        let mut appt = Appointment::new(
            employee.id,
            AppointmentType::ReturnToWork,
            status,
            employee.user_id,
        );
        appt.motif = Some("Douleurs dorsales".into());
        appt.notes = Some("Depuis lundi".into());
        appt.medical_instructions = Some("Venir à jeun".into());
        appt.medical_service_phone = Some("+212 600 000 000".into());
        (employee, appt, manager)
    }

    #[test]
    fn test_owner_on_proposal_can_confirm_and_cancel() {
        let (employee, appt, _) = fixture(AppointmentStatus::ProposedMedecin);
        let owner = RequestContext::new(employee.user_id, [Role::Employee]);
        let view = AppointmentView::project(&appt, &employee, &owner);
        assert!(view.can_confirm);
        assert!(view.can_cancel);
        assert!(!view.can_propose);
        assert!(view.can_comment);
        assert!(view.medical_instructions.is_some());
        assert_eq!(view.status_category, "PROPOSED");
    }

    #[test]
    fn test_rh_and_manager_get_filtered_fields() {
        let (employee, appt, manager) = fixture(AppointmentStatus::Confirmed);
        for viewer in [
            RequestContext::new(UserId::new(), [Role::Rh]),
            RequestContext::new(manager, [Role::Employee]),
        ] {
            let view = AppointmentView::project(&appt, &employee, &viewer);
            assert!(view.motif.is_none());
            assert!(view.notes.is_none());
            assert!(view.medical_instructions.is_none());
            assert!(view.medical_service_phone.is_none());
            assert!(!view.can_confirm);
            assert!(view.can_comment);
        }
    }

    #[test]
    fn test_medical_staff_flags() {
        let (employee, appt, _) = fixture(AppointmentStatus::RequestedEmployee);
        let nurse = RequestContext::new(UserId::new(), [Role::Nurse]);
        let view = AppointmentView::project(&appt, &employee, &nurse);
        assert!(view.can_confirm);
        assert!(view.can_propose);
        assert!(view.can_cancel);
        assert_eq!(view.motif.as_deref(), Some("Douleurs dorsales"));

        let (employee, appt, _) = fixture(AppointmentStatus::Obligatory);
        let view = AppointmentView::project(&appt, &employee, &nurse);
        assert!(!view.can_confirm);
        assert!(view.can_propose);
        assert_eq!(view.status_category, "REQUESTED");
    }
}
