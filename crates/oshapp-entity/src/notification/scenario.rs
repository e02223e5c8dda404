//! Notification scenario tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::actor::NotificationActor;

/// Why a notification fires. Closed set; each variant has a dedicated
/// strategy in the router's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationScenario {
    /// An employee request or an RH mandatory visit was created.
    AppointmentRequested,
    /// Medical staff proposed a slot.
    AppointmentSlotProposed,
    /// Medical staff confirmed an employee request.
    AppointmentConfirmed,
    /// RH-facing variant of [`Self::AppointmentConfirmed`].
    AppointmentConfirmedRh,
    /// An appointment without medical preparation was cancelled.
    AppointmentCancelled,
    /// Medical staff planned a visit directly.
    MedicalVisitPlanned,
    /// The employee accepted a proposed or planned visit.
    MedicalVisitConfirmedByEmployee,
    /// A visit originated by medical staff was cancelled.
    MedicalVisitCancelled,
}

impl NotificationScenario {
    /// Every scenario.
    pub const ALL: [NotificationScenario; 8] = [
        Self::AppointmentRequested,
        Self::AppointmentSlotProposed,
        Self::AppointmentConfirmed,
        Self::AppointmentConfirmedRh,
        Self::AppointmentCancelled,
        Self::MedicalVisitPlanned,
        Self::MedicalVisitConfirmedByEmployee,
        Self::MedicalVisitCancelled,
    ];

    /// Return the wire name of the scenario.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AppointmentRequested => "APPOINTMENT_REQUESTED",
            Self::AppointmentSlotProposed => "APPOINTMENT_SLOT_PROPOSED",
            Self::AppointmentConfirmed => "APPOINTMENT_CONFIRMED",
            Self::AppointmentConfirmedRh => "APPOINTMENT_CONFIRMED_RH",
            Self::AppointmentCancelled => "APPOINTMENT_CANCELLED",
            Self::MedicalVisitPlanned => "MEDICAL_VISIT_PLANNED",
            Self::MedicalVisitConfirmedByEmployee => "MEDICAL_VISIT_CONFIRMED_BY_EMPLOYEE",
            Self::MedicalVisitCancelled => "MEDICAL_VISIT_CANCELLED",
        }
    }

    /// Actor implied by the scenario name when the caller gives none.
    pub fn implied_actor(&self) -> Option<NotificationActor> {
        let name = self.as_str();
        if name.ends_with("_BY_EMPLOYEE") {
            Some(NotificationActor::Employee)
        } else if name.ends_with("_RH") {
            Some(NotificationActor::Rh)
        } else if name.contains("MEDICAL_STAFF")
            || name.contains("OBLIGATORY")
            || name.contains("SLOT_PROPOSED")
            || *self == Self::MedicalVisitPlanned
        {
            Some(NotificationActor::MedicalStaff)
        } else {
            None
        }
    }
}

impl fmt::Display for NotificationScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationScenario {
    type Err = oshapp_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|scenario| scenario.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                oshapp_core::AppError::validation(format!("Unknown notification scenario: '{s}'"))
            })
    }
}

/// Generic notices predating the scenario set. Still accepted by the router
/// and used as its fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegacyNotice {
    /// "Nouveau rendez-vous".
    Creation,
    /// "Statut mis à jour".
    StatusUpdate,
    /// "Visite médicale obligatoire".
    Obligatory,
}

impl LegacyNotice {
    /// Return the wire name of the notice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creation => "CREATION",
            Self::StatusUpdate => "STATUS_UPDATE",
            Self::Obligatory => "OBLIGATORY",
        }
    }
}

/// A raw topic name resolved against the scenario set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioTag {
    /// One of the closed scenarios.
    Known(NotificationScenario),
    /// A legacy generic notice.
    Legacy(LegacyNotice),
    /// Anything else; handled with a generic notice and a warning.
    Unknown(String),
}

impl ScenarioTag {
    /// Classify a raw topic name.
    pub fn parse(raw: &str) -> Self {
        if let Ok(scenario) = raw.parse::<NotificationScenario>() {
            return Self::Known(scenario);
        }
        match raw.trim().to_uppercase().as_str() {
            "CREATION" => Self::Legacy(LegacyNotice::Creation),
            "STATUS_UPDATE" => Self::Legacy(LegacyNotice::StatusUpdate),
            "OBLIGATORY" => Self::Legacy(LegacyNotice::Obligatory),
            _ => Self::Unknown(raw.to_string()),
        }
    }
}

impl From<NotificationScenario> for ScenarioTag {
    fn from(scenario: NotificationScenario) -> Self {
        Self::Known(scenario)
    }
}
