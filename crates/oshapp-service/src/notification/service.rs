//! In-app notification feed operations and the appointment upsert path.

use std::sync::Arc;

use tracing::{debug, info};

use oshapp_core::config::NotificationsConfig;
use oshapp_core::error::AppError;
use oshapp_core::types::id::{AppointmentId, NotificationId, UserId};
use oshapp_database::repositories::NotificationRepository;
use oshapp_entity::notification::{Notification, NotificationDraft};

use crate::context::RequestContext;

/// Manages user notification feeds.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notif_repo: Arc<dyn NotificationRepository>,
    /// Feed settings.
    config: NotificationsConfig,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notif_repo: Arc<dyn NotificationRepository>, config: NotificationsConfig) -> Self {
        Self { notif_repo, config }
    }

    /// Upsert the recipient's row for an appointment.
    ///
    /// Title and message are clamped to the configured field length.
    pub async fn upsert_for_appointment(
        &self,
        recipient_id: UserId,
        appointment_id: AppointmentId,
        title: &str,
        message: &str,
        action_url: &str,
    ) -> Result<Notification, AppError> {
        let max = self.config.max_field_length;
        let draft = NotificationDraft::for_appointment(
            recipient_id,
            appointment_id.into_uuid(),
            clamp(title, max),
            clamp(message, max),
            action_url,
        );

        let stored = self
            .notif_repo
            .upsert(draft)
            .await
            .map_err(|e| AppError::delivery(format!("Failed to upsert notification: {e}")))?;

        debug!(
            notification_id = %stored.id,
            recipient_id = %recipient_id,
            appointment_id = %appointment_id,
            "In-app notification upserted"
        );
        Ok(stored)
    }

    /// Lists notifications for the current user, newest first.
    pub async fn list_notifications(
        &self,
        ctx: &RequestContext,
        limit: Option<usize>,
    ) -> Result<Vec<Notification>, AppError> {
        let limit = limit.unwrap_or(self.config.default_feed_limit);
        self.notif_repo.find_by_recipient(ctx.user_id, limit).await
    }

    /// Gets the unread notification count.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        self.notif_repo.count_unread(ctx.user_id).await
    }

    /// Marks a notification as read. Someone else's row reads as not found.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: NotificationId,
    ) -> Result<(), AppError> {
        if self.notif_repo.mark_read(notification_id, ctx.user_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!(
                "Notification {notification_id} not found"
            )))
        }
    }

    /// Marks all notifications as read for the current user.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        let changed = self.notif_repo.mark_all_read(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, changed, "Notifications marked read");
        Ok(changed)
    }

    /// Deletes one of the current user's notifications.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        notification_id: NotificationId,
    ) -> Result<(), AppError> {
        if self.notif_repo.delete(notification_id, ctx.user_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!(
                "Notification {notification_id} not found"
            )))
        }
    }
}

/// Truncate to `max` characters, ending with `...` when cut.
pub fn clamp(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
