//! In-app notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oshapp_core::types::id::{NotificationId, UserId};

use super::kind::NotificationType;

/// Related-entity type used for every appointment notification.
pub const RELATED_APPOINTMENT: &str = "APPOINTMENT";

/// A row in a user's notification feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The recipient user.
    pub recipient_id: UserId,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Type tag.
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Whether the recipient has read this notification.
    pub read: bool,
    /// Related entity type (`"APPOINTMENT"` for workflow events).
    pub related_entity_type: Option<String>,
    /// Related entity identifier.
    pub related_entity_id: Option<Uuid>,
    /// Deep link into the front end.
    pub action_url: Option<String>,
    /// When the notification was created or last resurfaced.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification has not been read.
    pub fn is_unread(&self) -> bool {
        !self.read
    }

    /// Whether this row is the per-appointment row for its recipient.
    pub fn is_for_appointment(&self, appointment_id: Uuid) -> bool {
        self.related_entity_type.as_deref() == Some(RELATED_APPOINTMENT)
            && self.related_entity_id == Some(appointment_id)
    }
}

/// Content to upsert into a recipient's feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationDraft {
    /// The recipient user.
    pub recipient_id: UserId,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Type tag.
    pub kind: NotificationType,
    /// Deep link into the front end.
    pub action_url: Option<String>,
    /// Related entity type.
    pub related_entity_type: Option<String>,
    /// Related entity identifier.
    pub related_entity_id: Option<Uuid>,
}

impl NotificationDraft {
    /// Draft for an appointment event.
    pub fn for_appointment(
        recipient_id: UserId,
        appointment_id: Uuid,
        title: impl Into<String>,
        message: impl Into<String>,
        action_url: impl Into<String>,
    ) -> Self {
        Self {
            recipient_id,
            title: title.into(),
            message: message.into(),
            kind: NotificationType::Appointment,
            action_url: Some(action_url.into()),
            related_entity_type: Some(RELATED_APPOINTMENT.to_string()),
            related_entity_id: Some(appointment_id),
        }
    }

    /// The (recipient, entity) key the store deduplicates on, if any.
    pub fn dedup_key(&self) -> Option<(UserId, Uuid)> {
        match (&self.related_entity_type, self.related_entity_id) {
            (Some(kind), Some(id)) if kind == RELATED_APPOINTMENT => Some((self.recipient_id, id)),
            _ => None,
        }
    }

    /// Materialize a new stored notification.
    pub fn into_notification(self) -> Notification {
        Notification {
            id: NotificationId::new(),
            recipient_id: self.recipient_id,
            title: self.title,
            message: self.message,
            kind: self.kind,
            read: false,
            related_entity_type: self.related_entity_type,
            related_entity_id: self.related_entity_id,
            action_url: self.action_url,
            created_at: Utc::now(),
        }
    }
}
