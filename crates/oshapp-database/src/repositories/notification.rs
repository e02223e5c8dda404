//! In-app notification repository contract.

use async_trait::async_trait;
use uuid::Uuid;

use oshapp_core::result::AppResult;
use oshapp_core::types::id::{NotificationId, UserId};
use oshapp_entity::notification::{Notification, NotificationDraft};

/// Storage for in-app notifications.
#[async_trait]
pub trait NotificationRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a draft, or overwrite the recipient's existing row for the
    /// same related appointment.
    ///
    /// On overwrite, title, message and action URL are replaced, the row is
    /// marked unread, and `created_at` is refreshed. Concurrent upserts for
    /// the same key resolve last-write-wins and never produce two rows.
    async fn upsert(&self, draft: NotificationDraft) -> AppResult<Notification>;

    /// Find a notification by id.
    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>>;

    /// The recipient's row for a related entity, if any.
    async fn find_for_entity(
        &self,
        recipient_id: UserId,
        entity_id: Uuid,
    ) -> AppResult<Option<Notification>>;

    /// Newest-first feed for a recipient.
    async fn find_by_recipient(
        &self,
        recipient_id: UserId,
        limit: usize,
    ) -> AppResult<Vec<Notification>>;

    /// Number of unread rows for a recipient.
    async fn count_unread(&self, recipient_id: UserId) -> AppResult<u64>;

    /// Mark one row read. Returns `false` if it does not belong to the recipient.
    async fn mark_read(&self, id: NotificationId, recipient_id: UserId) -> AppResult<bool>;

    /// Mark every row of a recipient read. Returns how many changed.
    async fn mark_all_read(&self, recipient_id: UserId) -> AppResult<u64>;

    /// Delete one row owned by the recipient.
    async fn delete(&self, id: NotificationId, recipient_id: UserId) -> AppResult<bool>;
}
