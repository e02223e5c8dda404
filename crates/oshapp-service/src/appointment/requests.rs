//! Request DTOs with validation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use oshapp_core::types::id::EmployeeId;
use oshapp_entity::appointment::{AppointmentType, VisitMode};

/// Employee request for a visit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateAppointmentRequest {
    /// Visit type; SPONTANEOUS when omitted.
    #[serde(rename = "type")]
    pub kind: Option<AppointmentType>,
    /// Wished date.
    pub requested_date: Option<NaiveDateTime>,
    /// Preferred mode.
    pub visit_mode: Option<VisitMode>,
    /// Reason for the visit.
    #[validate(length(max = 2000))]
    pub motif: Option<String>,
    /// Additional notes.
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// RH creation of a mandatory visit.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateObligatoryRequest {
    /// The employee summoned.
    pub employee_id: EmployeeId,
    /// Visit type.
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    /// Suggested date, if RH has one.
    pub requested_date: Option<NaiveDateTime>,
    /// Notes for the medical service.
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Medical staff planning a visit without a prior request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlanVisitRequest {
    /// The employee to see.
    pub employee_id: EmployeeId,
    /// Visit type.
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    /// Planned date.
    #[validate(required(message = "A planned date is required"))]
    pub scheduled_time: Option<NaiveDateTime>,
    /// On-site or remote.
    pub visit_mode: Option<VisitMode>,
    /// Preparation instructions for the employee.
    #[validate(length(max = 2000))]
    pub medical_instructions: Option<String>,
}

/// Medical staff proposing a slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProposeSlotRequest {
    /// Proposed date.
    #[validate(required(message = "A proposed date is required"))]
    pub proposed_date: Option<NaiveDateTime>,
    /// On-site or remote.
    pub visit_mode: Option<VisitMode>,
    /// Comment appended to the thread when not blank.
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
    /// Preparation instructions for the employee.
    #[validate(length(max = 2000))]
    pub medical_instructions: Option<String>,
}

/// Cancellation of an appointment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CancelRequest {
    /// Why the appointment is cancelled.
    #[validate(length(max = 2000))]
    pub reason: Option<String>,
}

/// Normalize optional free text: trimmed, blank becomes `None`.
pub fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_propose_requires_date() {
        let req = ProposeSlotRequest::default();
        assert!(req.validate().is_err());

        let req = ProposeSlotRequest {
            proposed_date: NaiveDate::from_ymd_opt(2025, 1, 12).and_then(|d| d.and_hms_opt(14, 0, 0)),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_text_length_capped() {
        let req = CreateAppointmentRequest {
            motif: Some("x".repeat(2001)),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some(" ok ".into())).as_deref(), Some("ok"));
    }
}
