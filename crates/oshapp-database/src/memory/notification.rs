//! In-memory notification store with per-appointment deduplication.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;
use uuid::Uuid;

use oshapp_core::result::AppResult;
use oshapp_core::types::id::{NotificationId, UserId};
use oshapp_entity::notification::{Notification, NotificationDraft};

use crate::repositories::NotificationRepository;

/// Notification store backed by concurrent maps.
///
/// Lock order is always index shard first, then row shard. Paths that
/// touch both maps without going through [`Self::upsert`] take one lock at
/// a time.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotificationRepository {
    /// Notification id → row.
    rows: Arc<DashMap<NotificationId, Notification>>,
    /// (recipient, related appointment) → row id.
    index: Arc<DashMap<(UserId, Uuid), NotificationId>>,
}

impl MemoryNotificationRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of rows across all recipients.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn insert_row(&self, draft: NotificationDraft) -> Notification {
        let row = draft.into_notification();
        self.rows.insert(row.id, row.clone());
        row
    }

    fn overwrite(existing: &mut Notification, draft: NotificationDraft) {
        existing.title = draft.title;
        existing.message = draft.message;
        existing.action_url = draft.action_url;
        existing.kind = draft.kind;
        existing.read = false;
        existing.created_at = Utc::now();
    }
}

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn upsert(&self, draft: NotificationDraft) -> AppResult<Notification> {
        let Some(key) = draft.dedup_key() else {
            return Ok(self.insert_row(draft));
        };

        // The index entry guard serializes writers for this key.
        match self.index.entry(key) {
            Entry::Occupied(mut slot) => {
                let id = *slot.get();
                if let Some(mut existing) = self.rows.get_mut(&id) {
                    Self::overwrite(&mut existing, draft);
                    debug!(notification_id = %id, recipient_id = %key.0, "Notification resurfaced");
                    return Ok(existing.clone());
                }
                // Row was deleted under us; start a fresh one for the key.
                let row = self.insert_row(draft);
                slot.insert(row.id);
                Ok(row)
            }
            Entry::Vacant(slot) => {
                let row = self.insert_row(draft);
                slot.insert(row.id);
                debug!(notification_id = %row.id, recipient_id = %key.0, "Notification created");
                Ok(row)
            }
        }
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn find_for_entity(
        &self,
        recipient_id: UserId,
        entity_id: Uuid,
    ) -> AppResult<Option<Notification>> {
        let id = match self.index.get(&(recipient_id, entity_id)) {
            Some(id) => *id,
            None => return Ok(None),
        };
        self.find_by_id(id).await
    }

    async fn find_by_recipient(
        &self,
        recipient_id: UserId,
        limit: usize,
    ) -> AppResult<Vec<Notification>> {
        let mut items: Vec<Notification> = self
            .rows
            .iter()
            .filter(|r| r.recipient_id == recipient_id)
            .map(|r| r.value().clone())
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(limit);
        Ok(items)
    }

    async fn count_unread(&self, recipient_id: UserId) -> AppResult<u64> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.recipient_id == recipient_id && r.is_unread())
            .count() as u64)
    }

    async fn mark_read(&self, id: NotificationId, recipient_id: UserId) -> AppResult<bool> {
        match self.rows.get_mut(&id) {
            Some(mut row) if row.recipient_id == recipient_id => {
                row.read = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_all_read(&self, recipient_id: UserId) -> AppResult<u64> {
        let mut changed = 0;
        for mut row in self.rows.iter_mut() {
            if row.recipient_id == recipient_id && !row.read {
                row.read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn delete(&self, id: NotificationId, recipient_id: UserId) -> AppResult<bool> {
        let removed = self
            .rows
            .remove_if(&id, |_, row| row.recipient_id == recipient_id);

        let Some((_, row)) = removed else {
            return Ok(false);
        };
        if let Some(entity_id) = row.related_entity_id {
            self.index
                .remove_if(&(recipient_id, entity_id), |_, indexed| *indexed == id);
        }
        Ok(true)
    }
}
