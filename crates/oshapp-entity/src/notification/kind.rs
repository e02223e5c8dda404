//! Notification type enumeration.

use serde::{Deserialize, Serialize};

/// Type tag of an in-app notification, used by the feed for icons and
/// filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// Appointment workflow event.
    Appointment,
    /// Reminder.
    Reminder,
    /// Informational message.
    Info,
    /// Alert requiring attention.
    Alert,
}

impl NotificationType {
    /// Return the type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Appointment => "APPOINTMENT",
            Self::Reminder => "REMINDER",
            Self::Info => "INFO",
            Self::Alert => "ALERT",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
