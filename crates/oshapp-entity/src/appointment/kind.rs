//! Appointment type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regulatory reason for the visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentType {
    /// Requested spontaneously by the employee.
    #[default]
    Spontaneous,
    /// Pre-employment visit.
    PreRecruitment,
    /// Periodic check-up.
    Periodic,
    /// Visit after sick leave.
    ReturnToWork,
    /// Reinforced surveillance.
    SurveillanceParticuliere,
    /// Called by the occupational doctor.
    MedicalCall,
    /// Anything else.
    Other,
}

impl AppointmentType {
    /// Return the wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spontaneous => "SPONTANEOUS",
            Self::PreRecruitment => "PRE_RECRUITMENT",
            Self::Periodic => "PERIODIC",
            Self::ReturnToWork => "RETURN_TO_WORK",
            Self::SurveillanceParticuliere => "SURVEILLANCE_PARTICULIERE",
            Self::MedicalCall => "MEDICAL_CALL",
            Self::Other => "OTHER",
        }
    }

    /// Concise label used inside notification text and email subjects.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PreRecruitment => "Embauche",
            Self::ReturnToWork => "Reprise",
            Self::Periodic => "Périodique",
            Self::Spontaneous => "Spontané",
            Self::SurveillanceParticuliere => "Surveillance particulière",
            Self::MedicalCall => "À l'appel du médecin",
            Self::Other => "Autre",
        }
    }

    /// Long label shown in appointment details.
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::ReturnToWork => "Visite de Reprise",
            Self::PreRecruitment => "Visite d'Embauche",
            Self::Periodic => "Visite Périodique",
            Self::SurveillanceParticuliere => "Surveillance Particulière",
            Self::MedicalCall => "À l'appel du médecin",
            Self::Spontaneous => "Visite Spontanée",
            Self::Other => "Visite Obligatoire",
        }
    }

    /// Whether a return-to-work certificate accompanies the visit.
    pub fn has_certificate(&self) -> bool {
        matches!(self, Self::ReturnToWork)
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentType {
    type Err = oshapp_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SPONTANEOUS" => Ok(Self::Spontaneous),
            "PRE_RECRUITMENT" => Ok(Self::PreRecruitment),
            "PERIODIC" => Ok(Self::Periodic),
            "RETURN_TO_WORK" => Ok(Self::ReturnToWork),
            "SURVEILLANCE_PARTICULIERE" => Ok(Self::SurveillanceParticuliere),
            "MEDICAL_CALL" => Ok(Self::MedicalCall),
            "OTHER" => Ok(Self::Other),
            _ => Err(oshapp_core::AppError::validation(format!(
                "Invalid appointment type: '{s}'"
            ))),
        }
    }
}
