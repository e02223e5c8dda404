//! Appointment workflow state machine.
//!
//! Transitions are checked in two steps: the actor must be allowed to
//! perform the transition, then the current status must permit it. Both
//! checks are pure; the service applies the effect and commits.

use oshapp_core::error::AppError;
use oshapp_entity::appointment::{Appointment, AppointmentStatus};
use oshapp_entity::user::Employee;

use crate::context::RequestContext;

use AppointmentStatus::*;

/// A transition on an existing appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Medical staff propose a slot.
    ProposeSlot,
    /// The employee accepts a proposed or planned visit.
    ConfirmByEmployee,
    /// Medical staff accept the employee's requested date.
    ConfirmByMedicalStaff,
    /// Anyone involved cancels.
    Cancel,
    /// Medical staff record that the visit took place.
    Complete,
}

impl Transition {
    /// Every transition.
    pub const ALL: [Transition; 5] = [
        Self::ProposeSlot,
        Self::ConfirmByEmployee,
        Self::ConfirmByMedicalStaff,
        Self::Cancel,
        Self::Complete,
    ];

    /// Status reached on success.
    pub fn target(&self) -> AppointmentStatus {
        match self {
            Self::ProposeSlot => ProposedMedecin,
            Self::ConfirmByEmployee | Self::ConfirmByMedicalStaff => Confirmed,
            Self::Cancel => Cancelled,
            Self::Complete => Completed,
        }
    }

    /// Whether the transition may start from `status`.
    pub fn allowed_from(&self, status: AppointmentStatus) -> bool {
        match self {
            Self::ProposeSlot => matches!(status, RequestedEmployee | Obligatory | ProposedMedecin),
            Self::ConfirmByEmployee => matches!(status, ProposedMedecin | PlannedByMedicalStaff),
            Self::ConfirmByMedicalStaff => status == RequestedEmployee,
            Self::Cancel => !status.is_terminal(),
            Self::Complete => status == Confirmed,
        }
    }

    /// Whether the actor may perform the transition on this employee's appointment.
    pub fn permits(&self, ctx: &RequestContext, employee: &Employee) -> bool {
        match self {
            Self::ProposeSlot | Self::ConfirmByMedicalStaff | Self::Complete => {
                ctx.is_medical_staff()
            }
            Self::ConfirmByEmployee => ctx.owns(employee),
            Self::Cancel => ctx.owns(employee) || ctx.is_medical_staff() || ctx.is_rh(),
        }
    }

    /// Authorization then state check.
    pub fn guard(
        &self,
        ctx: &RequestContext,
        appointment: &Appointment,
        employee: &Employee,
    ) -> Result<(), AppError> {
        if !self.permits(ctx, employee) {
            return Err(AppError::unauthorized(format!(
                "User {} may not perform {:?} on appointment {}",
                ctx.user_id, self, appointment.id
            )));
        }
        if !self.allowed_from(appointment.status) {
            return Err(AppError::invalid_transition(appointment.status, self.target()));
        }
        Ok(())
    }

    /// Route a generic "confirm" to the branch matching actor and status.
    pub fn route_confirm(
        ctx: &RequestContext,
        appointment: &Appointment,
        employee: &Employee,
    ) -> Result<Transition, AppError> {
        let by_employee = Self::ConfirmByEmployee;
        let by_staff = Self::ConfirmByMedicalStaff;

        if by_employee.permits(ctx, employee) && by_employee.allowed_from(appointment.status) {
            return Ok(by_employee);
        }
        if by_staff.permits(ctx, employee) && by_staff.allowed_from(appointment.status) {
            return Ok(by_staff);
        }
        if !by_employee.permits(ctx, employee) && !by_staff.permits(ctx, employee) {
            return Err(AppError::unauthorized(format!(
                "User {} may not confirm appointment {}",
                ctx.user_id, appointment.id
            )));
        }
        Err(AppError::invalid_transition(appointment.status, Confirmed))
    }
}
