//! Notification actor enumeration.

use serde::{Deserialize, Serialize};

/// Role context credited with triggering a scenario. Selects message
/// phrasing; it may differ from the role of whoever issued the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationActor {
    /// The employee concerned by the appointment.
    Employee,
    /// A nurse or doctor.
    MedicalStaff,
    /// Human resources.
    Rh,
}

impl NotificationActor {
    /// Return the wire name of the actor.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "EMPLOYEE",
            Self::MedicalStaff => "MEDICAL_STAFF",
            Self::Rh => "RH",
        }
    }
}

impl std::fmt::Display for NotificationActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
