//! Visit mode enumeration.

use serde::{Deserialize, Serialize};

/// Whether the visit happens on site or remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisitMode {
    /// On-site visit.
    InPerson,
    /// Remote consultation.
    Remote,
}

impl VisitMode {
    /// French label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InPerson => "Présentiel",
            Self::Remote => "À distance",
        }
    }
}

/// Label for an optional mode, as shown in appointment details.
pub fn mode_label(mode: Option<VisitMode>) -> &'static str {
    mode.map(|m| m.label()).unwrap_or("Non spécifié")
}
