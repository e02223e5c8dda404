//! Appointment workflow status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    /// Requested by the employee, awaiting medical staff.
    RequestedEmployee,
    /// Created by RH as a mandatory visit, awaiting a slot proposal.
    Obligatory,
    /// Medical staff proposed a slot, awaiting the employee.
    ProposedMedecin,
    /// Planned directly by medical staff, awaiting the employee.
    PlannedByMedicalStaff,
    /// Date agreed by both sides.
    Confirmed,
    /// Cancelled (terminal).
    Cancelled,
    /// Visit took place (terminal).
    Completed,
}

impl AppointmentStatus {
    /// Every status, in workflow order.
    pub const ALL: [AppointmentStatus; 7] = [
        Self::RequestedEmployee,
        Self::Obligatory,
        Self::ProposedMedecin,
        Self::PlannedByMedicalStaff,
        Self::Confirmed,
        Self::Cancelled,
        Self::Completed,
    ];

    /// Return the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequestedEmployee => "REQUESTED_EMPLOYEE",
            Self::Obligatory => "OBLIGATORY",
            Self::ProposedMedecin => "PROPOSED_MEDECIN",
            Self::PlannedByMedicalStaff => "PLANNED_BY_MEDICAL_STAFF",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Whether an appointment can be created directly in this status.
    pub fn is_initial(&self) -> bool {
        matches!(
            self,
            Self::RequestedEmployee | Self::Obligatory | Self::PlannedByMedicalStaff
        )
    }

    /// Long French label shown in appointment details.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RequestedEmployee => "En attente de la réponse de médecin ou infirmier",
            Self::Obligatory => "Planifié (Obligatoire)",
            Self::ProposedMedecin => "Proposé par médecin ou infirmier",
            Self::PlannedByMedicalStaff => "Planifié par le service médical",
            Self::Confirmed => "Confirmé",
            Self::Cancelled => "Annulé",
            Self::Completed => "Terminé",
        }
    }

    /// Coarse bucket used by list views. Mandatory visits waiting for a slot
    /// are grouped with employee requests.
    pub fn ui_category(&self) -> &'static str {
        match self {
            Self::RequestedEmployee | Self::Obligatory => "REQUESTED",
            Self::ProposedMedecin => "PROPOSED",
            Self::PlannedByMedicalStaff => "PLANNED",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Short label for the UI bucket.
    pub fn ui_label(&self) -> &'static str {
        match self.ui_category() {
            "REQUESTED" => "En attente",
            "PROPOSED" => "Créneau proposé",
            _ => self.label(),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = oshapp_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                oshapp_core::AppError::validation(format!("Invalid appointment status: '{s}'"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(AppointmentStatus::Cancelled.is_terminal());
        assert!(AppointmentStatus::Completed.is_terminal());
        assert!(!AppointmentStatus::Confirmed.is_terminal());
    }

    #[test]
    fn test_obligatory_groups_with_requested() {
        assert_eq!(AppointmentStatus::Obligatory.ui_category(), "REQUESTED");
        assert_eq!(AppointmentStatus::Obligatory.ui_label(), "En attente");
        assert_eq!(AppointmentStatus::Confirmed.ui_label(), "Confirmé");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "proposed_medecin".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::ProposedMedecin
        );
        assert!("pending".parse::<AppointmentStatus>().is_err());
    }
}
